//! HTTP route handlers.
//!
//! Handlers stay thin: extract, call the store or a resolver, wrap the
//! result in a document. Every failure goes out through
//! [`ApiError`](crate::ApiError).

pub mod health;
pub mod items;
pub mod merchants;

use bazaar_core::CoreError;

use crate::error::ApiError;

/// Reads a path id. Anything that isn't an integer can't name a record,
/// so it is reported as NotFound with the raw text.
pub(crate) fn parse_id(entity: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| CoreError::not_found(entity, raw).into())
}
