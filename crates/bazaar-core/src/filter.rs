//! # Filter Resolver
//!
//! Turns the optional, stringly-typed search parameters of
//! `GET /items/find_all` into exactly one [`ItemQuery`], or refuses.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  First matching rule wins. Everything else is ignored.                  │
//! │                                                                         │
//! │   #  name   min_price  max_price   → query                             │
//! │  ──  ─────  ─────────  ─────────   ──────────────────────────────────  │
//! │   1  yes    no         no          → NameContains(name)                │
//! │   2  no     valid      valid       → PriceBetween { min, max }         │
//! │   3  no     valid      no          → PriceAtLeast(min)                 │
//! │   4  no     no         valid       → PriceAtMost(max)                  │
//! │   -  anything else                 → BadQuery                          │
//! │                                                                         │
//! │  "valid" = parses as a non-negative whole number                       │
//! │  "yes"   = key present with a non-blank value                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rules are mutually exclusive, so the search endpoint always runs a
//! single query of a known shape. Name and price cannot be combined.
//!
//! ## Price Parsing
//! Bounds are parsed [`PriceParsing::Lenient`] by default: the leading
//! integer is read and a value with no leading digits counts as `0`
//! (`"abc"` → 0, `"50abc"` → 50). [`PriceParsing::Strict`] requires the
//! whole value to be an integer. A negative bound is rejected either way.

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Inputs
// =============================================================================

/// Raw query-string parameters of the item search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemSearchParams {
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

/// How price bounds are read from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceParsing {
    /// Leading integer, non-numeric text reads as zero.
    #[default]
    Lenient,
    /// The whole value must be an integer.
    Strict,
}

// =============================================================================
// Resolved Query
// =============================================================================

/// The single query a search request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemQuery {
    /// Case-insensitive substring match on the item name.
    NameContains(String),
    /// `min <= unit_price <= max`.
    PriceBetween { min: Money, max: Money },
    /// `unit_price >= min`.
    PriceAtLeast(Money),
    /// `unit_price <= max`.
    PriceAtMost(Money),
}

impl ItemQuery {
    /// Short name of the resolved mode, for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            ItemQuery::NameContains(_) => "name",
            ItemQuery::PriceBetween { .. } => "price_range",
            ItemQuery::PriceAtLeast(_) => "price_floor",
            ItemQuery::PriceAtMost(_) => "price_ceiling",
        }
    }
}

/// Case folding shared by stored names and search needles.
///
/// Unicode-aware, so `"ÉCOLE"` and `"école"` fold to the same text.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

// =============================================================================
// Resolution
// =============================================================================

/// Parameters after the presence check: blank values are treated as absent.
/// Present values are kept verbatim.
struct Present<'a> {
    name: Option<&'a str>,
    min_price: Option<&'a str>,
    max_price: Option<&'a str>,
}

impl<'a> Present<'a> {
    fn from_params(params: &'a ItemSearchParams) -> Self {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.trim().is_empty())
        }

        Present {
            name: present(&params.name),
            min_price: present(&params.min_price),
            max_price: present(&params.max_price),
        }
    }
}

type Rule = fn(&Present<'_>, PriceParsing) -> Option<ItemQuery>;

/// Precedence order of the resolution rules.
const RULES: [Rule; 4] = [name_search, price_range, price_floor, price_ceiling];

/// Resolves search parameters into a single query.
///
/// ## Returns
/// * `Ok(ItemQuery)` - The first rule that matched
/// * `Err(CoreError::BadQuery)` - No rule matched
///
/// ## Example
/// ```rust
/// use bazaar_core::filter::{resolve, ItemSearchParams, PriceParsing};
/// use bazaar_core::CoreError;
///
/// let params = ItemSearchParams {
///     name: Some("table".to_string()),
///     min_price: Some("50".to_string()),
///     max_price: None,
/// };
/// assert_eq!(resolve(&params, PriceParsing::Lenient), Err(CoreError::BadQuery));
/// ```
pub fn resolve(params: &ItemSearchParams, parsing: PriceParsing) -> CoreResult<ItemQuery> {
    let present = Present::from_params(params);
    RULES
        .iter()
        .find_map(|rule| rule(&present, parsing))
        .ok_or(CoreError::BadQuery)
}

fn name_search(p: &Present<'_>, _: PriceParsing) -> Option<ItemQuery> {
    match (p.name, p.min_price, p.max_price) {
        (Some(name), None, None) => Some(ItemQuery::NameContains(name.to_string())),
        _ => None,
    }
}

fn price_range(p: &Present<'_>, parsing: PriceParsing) -> Option<ItemQuery> {
    match (p.name, p.min_price, p.max_price) {
        (None, Some(min), Some(max)) => Some(ItemQuery::PriceBetween {
            min: parse_bound(min, parsing)?,
            max: parse_bound(max, parsing)?,
        }),
        _ => None,
    }
}

fn price_floor(p: &Present<'_>, parsing: PriceParsing) -> Option<ItemQuery> {
    match (p.name, p.min_price, p.max_price) {
        (None, Some(min), None) => parse_bound(min, parsing).map(ItemQuery::PriceAtLeast),
        _ => None,
    }
}

fn price_ceiling(p: &Present<'_>, parsing: PriceParsing) -> Option<ItemQuery> {
    match (p.name, p.min_price, p.max_price) {
        (None, None, Some(max)) => parse_bound(max, parsing).map(ItemQuery::PriceAtMost),
        _ => None,
    }
}

/// Reads a price bound in whole units. `None` means the bound is invalid.
fn parse_bound(raw: &str, parsing: PriceParsing) -> Option<Money> {
    let units = match parsing {
        PriceParsing::Strict => raw.trim().parse::<i64>().ok()?,
        PriceParsing::Lenient => leading_integer(raw)?,
    };

    if units < 0 {
        return None;
    }

    Money::from_whole_units(units)
}

/// Parses the leading `[+-]digits` run of a string. No digits reads as 0;
/// `None` only on overflow.
fn leading_integer(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for digit in rest.bytes().take_while(u8::is_ascii_digit) {
        value = value.checked_mul(10)?.checked_add(i64::from(digit - b'0'))?;
    }

    Some(if negative { -value } else { value })
}

// =============================================================================
// Merchant Find
// =============================================================================

/// Resolves the `name` parameter of `GET /merchants/find`.
///
/// The store matches it case-insensitively and keeps the match whose
/// case-folded name sorts first. A non-blank name is used as given.
pub fn resolve_merchant_name(name: Option<&str>) -> CoreResult<String> {
    name.filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .ok_or(CoreError::BadQuery)
}

// =============================================================================
// Unit Tests
// =============================================================================
