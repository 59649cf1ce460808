//! # bazaar-core: Pure Logic for Bazaar
//!
//! This crate holds every piece of Bazaar that makes a decision: which
//! search query a set of parameters resolves to, what a response body looks
//! like, and which HTTP status a failure maps to. It has zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bazaar Request Flow                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP layer (apps/api)                        │   │
//! │  │    GET /items/find_all?name=tab  ──►  handler                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  filter   │  │ envelope  │  │ error_map │  │ validation│  │   │
//! │  │   │ ItemQuery │  │ Document  │  │ ErrorDoc  │  │  fields   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-db (Entity Store)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Merchant, Item, request bodies)
//! - [`money`] - Money type with integer cents
//! - [`error`] - Domain error types
//! - [`validation`] - Required-field checks for items
//! - [`filter`] - Search parameter resolution
//! - [`envelope`] - `{data: ...}` response documents
//! - [`error_map`] - `{errors: [...]}` response documents
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::filter::{resolve, ItemQuery, ItemSearchParams, PriceParsing};
//! use bazaar_core::Money;
//!
//! let params = ItemSearchParams {
//!     min_price: Some("50".to_string()),
//!     ..Default::default()
//! };
//!
//! let query = resolve(&params, PriceParsing::Lenient).unwrap();
//! assert_eq!(query, ItemQuery::PriceAtLeast(Money::from_cents(5_000)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod envelope;
pub mod error;
pub mod error_map;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use envelope::{Document, Resource, ResourceObject};
pub use error::{CoreError, CoreResult, FieldError, ValidationError};
pub use error_map::{ErrorDocument, ErrorMessage, ErrorObject};
pub use filter::{ItemQuery, ItemSearchParams, PriceParsing};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Singular resource name used for items in envelopes and error titles.
pub const ITEM_TYPE: &str = "item";

/// Singular resource name used for merchants in envelopes and error titles.
pub const MERCHANT_TYPE: &str = "merchant";
