//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - NotFound / ValidationFailed / BadQuery         │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── FieldError       - One failing attribute                          │
//! │                                                                         │
//! │  bazaar-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in app)                                                  │
//! │  └── ApiError         - What the client sees (status + envelope)       │
//! │                                                                         │
//! │  Flow: FieldError → ValidationError → CoreError → DbError → ApiError   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of each [`CoreError`] is the `title` clients receive,
//! so the wording here is part of the wire contract.

use thiserror::Error;

use crate::validation::Field;

// =============================================================================
// Core Error
// =============================================================================

/// The three failure kinds a request can end in.
///
/// Every variant is recoverable at the HTTP boundary; see
/// [`crate::error_map`] for the status each one maps to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Requested id is absent from the store.
    ///
    /// `id` is kept as text so a non-numeric path segment can be echoed
    /// back verbatim.
    #[error("Couldn't find {entity} with 'id'={id}")]
    NotFound { entity: String, id: String },

    /// A required field is missing or malformed.
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    /// Search parameters don't resolve to exactly one query mode.
    ///
    /// Carries no message: only the status matters to clients.
    #[error("search parameters do not resolve to a query")]
    BadQuery,
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `Fields` collects every failing attribute so one response can name all
/// of them, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more attributes failed their checks.
    #[error("Validation failed: {}", join_fields(.0))]
    Fields(Vec<FieldError>),

    /// The request body itself could not be read.
    #[error("Validation failed: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Shorthand for a single failing field.
    pub fn field(error: FieldError) -> Self {
        ValidationError::Fields(vec![error])
    }

    /// Returns the failing fields (empty for `Malformed`).
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ValidationError::Fields(errors) => errors,
            ValidationError::Malformed(_) => &[],
        }
    }
}

/// One attribute that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Missing, null, or whitespace-only.
    #[error("{} can't be blank", .0.label())]
    Blank(Field),

    /// Present but not parseable as a decimal number.
    #[error("{} is not a number", .0.label())]
    NotANumber(Field),

    /// Parsed, but below zero.
    #[error("{} must be greater than or equal to 0", .0.label())]
    Negative(Field),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
