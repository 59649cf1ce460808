//! # Validation Module
//!
//! Required-field checks for items and merchants.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Item Write Validation                              │
//! │                                                                         │
//! │  Phase 1: Reference (bazaar-db, needs I/O)                             │
//! │  └── merchant_id supplied but no such merchant? → NotFound (404)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Phase 2: Fields (THIS MODULE, pure)                                   │
//! │  ├── name, description present and not blank                           │
//! │  ├── unit_price present, numeric, not negative                         │
//! │  └── merchant_id present                                               │
//! │      Every failure is collected → ValidationFailed (400)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Database: NOT NULL, CHECK and FOREIGN KEY constraints                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::types::NewItem;
//! use bazaar_core::validation::validate_new_item;
//!
//! let input: NewItem = serde_json::from_str(
//!     r#"{"name": "Treadmill", "unit_price": 1000.00, "merchant_id": 1}"#,
//! ).unwrap();
//!
//! let err = validate_new_item(&input).unwrap_err();
//! assert_eq!(err.to_string(), "Validation failed: Description can't be blank");
//! ```

use serde::Serialize;

use crate::error::{FieldError, ValidationError};
use crate::money::Money;
use crate::types::{Item, ItemChanges, ItemFields, NewItem, PriceInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Fields
// =============================================================================

/// A writable attribute, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Description,
    UnitPrice,
    MerchantId,
}

impl Field {
    /// Human-readable label used in validation messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Description => "Description",
            Field::UnitPrice => "Unit price",
            Field::MerchantId => "Merchant",
        }
    }
}

// =============================================================================
// Single-Field Checks
// =============================================================================

/// Requires a non-blank string; returns it trimmed.
pub fn required_text(field: Field, value: Option<&str>) -> Result<String, FieldError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(FieldError::Blank(field)),
    }
}

/// Requires a numeric, non-negative price.
pub fn required_price(value: Option<&PriceInput>) -> Result<Money, FieldError> {
    let input = value.ok_or(FieldError::Blank(Field::UnitPrice))?;
    if input.is_blank() {
        return Err(FieldError::Blank(Field::UnitPrice));
    }

    let price = input
        .to_money()
        .map_err(|_| FieldError::NotANumber(Field::UnitPrice))?;

    if price.is_negative() {
        return Err(FieldError::Negative(Field::UnitPrice));
    }

    Ok(price)
}

/// Requires a merchant reference.
pub fn required_reference(value: Option<i64>) -> Result<i64, FieldError> {
    value.ok_or(FieldError::Blank(Field::MerchantId))
}

/// Validates a merchant name.
pub fn validate_merchant_name(name: &str) -> ValidationResult<String> {
    required_text(Field::Name, Some(name)).map_err(ValidationError::field)
}

// =============================================================================
// Item Checks
// =============================================================================

/// Checks every field of a create request.
///
/// Reports all blank or malformed fields at once, in declaration order.
pub fn validate_new_item(input: &NewItem) -> ValidationResult<ItemFields> {
    let mut errors = Vec::new();

    let name = collect(required_text(Field::Name, input.name.as_deref()), &mut errors);
    let description = collect(
        required_text(Field::Description, input.description.as_deref()),
        &mut errors,
    );
    let unit_price = collect(required_price(input.unit_price.as_ref()), &mut errors);
    let merchant_id = collect(required_reference(input.merchant_id), &mut errors);

    finish(name, description, unit_price, merchant_id, errors)
}

/// Checks a partial update against the item it modifies.
///
/// Absent fields keep their current value; supplied fields go through the
/// same checks as on create.
pub fn validate_item_changes(
    changes: &ItemChanges,
    current: &Item,
) -> ValidationResult<ItemFields> {
    let mut errors = Vec::new();

    let name = match changes.name.as_deref() {
        Some(value) => collect(required_text(Field::Name, Some(value)), &mut errors),
        None => Some(current.name.clone()),
    };
    let description = match changes.description.as_deref() {
        Some(value) => collect(required_text(Field::Description, Some(value)), &mut errors),
        None => Some(current.description.clone()),
    };
    let unit_price = match changes.unit_price.as_ref() {
        Some(value) => collect(required_price(Some(value)), &mut errors),
        None => Some(current.unit_price),
    };
    let merchant_id = Some(changes.merchant_id.unwrap_or(current.merchant_id));

    finish(name, description, unit_price, merchant_id, errors)
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn finish(
    name: Option<String>,
    description: Option<String>,
    unit_price: Option<Money>,
    merchant_id: Option<i64>,
    errors: Vec<FieldError>,
) -> ValidationResult<ItemFields> {
    match (name, description, unit_price, merchant_id) {
        (Some(name), Some(description), Some(unit_price), Some(merchant_id))
            if errors.is_empty() =>
        {
            Ok(ItemFields {
                name,
                description,
                unit_price,
                merchant_id,
            })
        }
        _ => Err(ValidationError::Fields(errors)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
