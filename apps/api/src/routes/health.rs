//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// `GET /up`: 200 while the database answers, 503 otherwise.
pub async fn up(State(state): State<AppState>) -> ApiResult<StatusCode> {
    if state.db.health_check().await {
        Ok(StatusCode::OK)
    } else {
        Err(ApiError::Unavailable("database is not responding".to_string()))
    }
}
