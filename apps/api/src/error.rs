//! Error types for the HTTP layer.
//!
//! [`ApiError`] is the single place where a failure becomes a response:
//!
//! ```text
//! CoreError ──────────────┐
//! DbError::Core(e) ───────┼──► ApiError::Core ──► status_code() + to_document()
//! JsonRejection ──────────┘      (ValidationFailed)
//!
//! DbError (anything else) ───► ApiError::Internal ──► 500, details logged only
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bazaar_core::{CoreError, ErrorDocument, ErrorMessage, ValidationError};
use bazaar_db::DbError;
use tracing::{error, warn};

/// Failures a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// NotFound, ValidationFailed or BadQuery.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure outside the domain taxonomy.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A dependency is down (health check only).
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The `{"errors": [...]}` body.
    pub fn document(&self) -> ErrorDocument {
        match self {
            ApiError::Core(err) => err.to_document(),
            ApiError::Internal(_) => {
                ErrorMessage::new(Some("Internal server error".to_string()), 500).into()
            }
            ApiError::Unavailable(_) => {
                ErrorMessage::new(Some("Service unavailable".to_string()), 503).into()
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => ApiError::Core(core),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Core(ValidationError::Malformed(rejection.body_text()).into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(reason = %rejection.body_text(), "Unreadable query string");
        ApiError::Core(CoreError::BadQuery)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) | ApiError::Unavailable(detail) => {
                error!(error = %detail, "Request failed");
            }
            ApiError::Core(err) => {
                warn!(status = err.status_code(), error = %err, "Request rejected");
            }
        }

        (self.status(), Json(self.document())).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_status() {
        let err: ApiError = DbError::not_found("Item", 3).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.document().errors[0].title.as_deref(),
            Some("Couldn't find Item with 'id'=3")
        );

        let err = ApiError::from(CoreError::BadQuery);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.document().errors[0].title, None);
    }

    #[test]
    fn test_infrastructure_errors_are_opaque() {
        let err: ApiError = DbError::QueryFailed("no such table: items".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let doc = err.document();
        assert_eq!(doc.errors[0].status, "500");
        assert_eq!(doc.errors[0].title.as_deref(), Some("Internal server error"));
    }
}
