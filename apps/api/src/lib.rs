//! # Bazaar API
//!
//! JSON HTTP API over merchants and their items.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /api/v1                                                                │
//! │  ├── GET    /items                     all items                       │
//! │  ├── POST   /items                     create          201             │
//! │  ├── GET    /items/find_all            name / price search             │
//! │  ├── GET    /items/{id}                one item                        │
//! │  ├── PATCH  /items/{id}                partial update  (PUT too)       │
//! │  ├── DELETE /items/{id}                delete          204             │
//! │  ├── GET    /items/{id}/merchant       owning merchant                 │
//! │  ├── GET    /merchants                 all merchants                   │
//! │  ├── GET    /merchants/find            first name match                │
//! │  ├── GET    /merchants/{id}            one merchant                    │
//! │  └── GET    /merchants/{id}/items      merchant's items                │
//! │                                                                         │
//! │  GET /up                               health check                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The static `find_all` / `find` segments win over `{id}`.
//!
//! ## Configuration
//! See [`config::ApiConfig`].

pub mod config;
pub mod error;
pub mod routes;

use axum::routing::get;
use axum::Router;
use bazaar_core::PriceParsing;
use bazaar_db::Database;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};

/// Path prefix of the versioned API.
pub const API_PREFIX: &str = "/api/v1";

/// Shared application state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub price_parsing: PriceParsing,
}

impl AppState {
    pub fn new(db: Database, price_parsing: PriceParsing) -> Self {
        AppState { db, price_parsing }
    }
}

/// Builds the full router with state applied.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::items::router())
        .merge(routes::merchants::router());

    Router::new()
        .nest(API_PREFIX, api)
        .route("/up", get(routes::health::up))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
