//! # Domain Types
//!
//! Core domain types used throughout Bazaar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  owns 0..n   ┌─────────────────┐                  │
//! │  │    Merchant     │◄─────────────│      Item       │                  │
//! │  │  ─────────────  │              │  ─────────────  │                  │
//! │  │  id (integer)   │              │  id (integer)   │                  │
//! │  │  name           │              │  name           │                  │
//! │  └─────────────────┘              │  description    │                  │
//! │                                   │  unit_price     │                  │
//! │                                   │  merchant_id FK │                  │
//! │                                   └─────────────────┘                  │
//! │                                                                         │
//! │  Write inputs:  NewItem (create) ─┐                                    │
//! │                 ItemChanges (patch)┴──► validation ──► ItemFields      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are integers assigned by the store. They become strings only
//! inside response envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, MoneyParseError};

// =============================================================================
// Merchant
// =============================================================================

/// A seller that owns zero or more items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Merchant {
    /// Store-assigned identifier, immutable.
    pub id: i64,

    /// Display name.
    pub name: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Item
// =============================================================================

/// A product offered by a merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Store-assigned identifier, immutable.
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Price in cents.
    pub unit_price: Money,

    /// Owning merchant. Always resolves to a live merchant.
    pub merchant_id: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Write Inputs
// =============================================================================

/// A `unit_price` exactly as it arrived: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    /// True for an empty or whitespace-only string.
    pub fn is_blank(&self) -> bool {
        match self {
            PriceInput::Number(_) => false,
            PriceInput::Text(text) => text.trim().is_empty(),
        }
    }

    /// Reads the value as exact cents.
    ///
    /// JSON numbers go through their shortest decimal rendering, so
    /// `88.88` becomes 8888 cents rather than whatever the nearest double is.
    pub fn to_money(&self) -> Result<Money, MoneyParseError> {
        match self {
            PriceInput::Number(number) => Money::parse_decimal(&number.to_string()),
            PriceInput::Text(text) => Money::parse_decimal(text),
        }
    }
}

/// Body of a create request. Every field is optional here so that
/// validation, not deserialization, reports what is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<PriceInput>,
    pub merchant_id: Option<i64>,
}

/// Body of a partial update. Absent (or null) fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<PriceInput>,
    pub merchant_id: Option<i64>,
}

impl ItemChanges {
    /// Returns true if the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.unit_price.is_none()
            && self.merchant_id.is_none()
    }
}

/// A fully validated set of item attributes, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub unit_price: Money,
    pub merchant_id: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_input_accepts_numbers_and_strings() {
        let input: NewItem =
            serde_json::from_str(r#"{"unit_price": 88.88, "merchant_id": 1}"#).unwrap();
        let price = input.unit_price.unwrap();
        assert!(matches!(price, PriceInput::Number(_)));
        assert_eq!(price.to_money().unwrap(), Money::from_cents(8888));

        let input: NewItem = serde_json::from_str(r#"{"unit_price": "23.50"}"#).unwrap();
        assert_eq!(
            input.unit_price.unwrap().to_money().unwrap(),
            Money::from_cents(2350)
        );

        let input: NewItem = serde_json::from_str(r#"{"unit_price": 1000}"#).unwrap();
        assert_eq!(
            input.unit_price.unwrap().to_money().unwrap(),
            Money::from_cents(100_000)
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let input: NewItem = serde_json::from_str(r#"{"name": "Treadmill"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Treadmill"));
        assert!(input.description.is_none());
        assert!(input.unit_price.is_none());
        assert!(input.merchant_id.is_none());
    }

    #[test]
    fn test_price_input_blank() {
        assert!(PriceInput::Text("  ".to_string()).is_blank());
        assert!(!PriceInput::Text("1".to_string()).is_blank());
    }

    #[test]
    fn test_item_changes_is_empty() {
        assert!(ItemChanges::default().is_empty());
        let changes: ItemChanges = serde_json::from_str(r#"{"name": "Peloton"}"#).unwrap();
        assert!(!changes.is_empty());
    }
}
