//! # Error Mapping
//!
//! Turns a [`CoreError`] into a status code and an error document.
//!
//! ```text
//! ┌──────────────────────┬────────┬──────────────────────────────────────┐
//! │ CoreError            │ Status │ title                                │
//! ├──────────────────────┼────────┼──────────────────────────────────────┤
//! │ NotFound             │  404   │ "Couldn't find Item with 'id'=1"     │
//! │ ValidationFailed     │  400   │ "Validation failed: ..."             │
//! │ BadQuery             │  400   │ null                                 │
//! └──────────────────────┴────────┴──────────────────────────────────────┘
//!
//! Body: {"errors": [{"status": "404", "title": "..."}]}
//! ```
//!
//! `status` inside the body is the code as a string.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Error Message
// =============================================================================

/// A message paired with the status it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorMessage {
    pub message: Option<String>,
    pub status_code: u16,
}

impl ErrorMessage {
    pub fn new(message: Option<String>, status_code: u16) -> Self {
        ErrorMessage {
            message,
            status_code,
        }
    }
}

// =============================================================================
// Error Document
// =============================================================================

/// One entry of an error document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorObject {
    pub status: String,
    pub title: Option<String>,
}

/// The `{"errors": [...]}` body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl From<ErrorMessage> for ErrorDocument {
    fn from(message: ErrorMessage) -> Self {
        ErrorDocument {
            errors: vec![ErrorObject {
                status: message.status_code.to_string(),
                title: message.message,
            }],
        }
    }
}

// =============================================================================
// CoreError Mapping
// =============================================================================

impl CoreError {
    /// HTTP status for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::NotFound { .. } => 404,
            CoreError::ValidationFailed(_) => 400,
            CoreError::BadQuery => 400,
        }
    }

    /// The message clients see. `BadQuery` carries none.
    pub fn to_error_message(&self) -> ErrorMessage {
        let message = match self {
            CoreError::BadQuery => None,
            other => Some(other.to_string()),
        };
        ErrorMessage::new(message, self.status_code())
    }

    /// Full error document for this failure.
    pub fn to_document(&self) -> ErrorDocument {
        self.to_error_message().into()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldError, ValidationError};
    use crate::validation::Field;
    use serde_json::json;

    #[test]
    fn test_not_found_document() {
        let err = CoreError::not_found("Item", 1);
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            serde_json::to_value(err.to_document()).unwrap(),
            json!({
                "errors": [{ "status": "404", "title": "Couldn't find Item with 'id'=1" }]
            })
        );
    }

    #[test]
    fn test_validation_document() {
        let err: CoreError = ValidationError::field(FieldError::Blank(Field::Description)).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            serde_json::to_value(err.to_document()).unwrap(),
            json!({
                "errors": [{
                    "status": "400",
                    "title": "Validation failed: Description can't be blank"
                }]
            })
        );
    }

    #[test]
    fn test_bad_query_has_null_title() {
        let err = CoreError::BadQuery;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_error_message(), ErrorMessage::new(None, 400));
        assert_eq!(
            serde_json::to_value(err.to_document()).unwrap(),
            json!({ "errors": [{ "status": "400", "title": null }] })
        );
    }
}
