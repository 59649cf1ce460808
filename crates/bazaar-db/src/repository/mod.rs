//! # Repository Module
//!
//! The Entity Store: all SQL lives behind these two repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                           │
//! │       │  db.items().search(&query)                                      │
//! │       ▼                                                                 │
//! │  ItemRepository                      MerchantRepository                 │
//! │  ├── find / get_by_id / list         ├── find / get_by_id / list        │
//! │  ├── search(&ItemQuery)              ├── find_first_by_name             │
//! │  ├── list_for_merchant               ├── insert / delete                │
//! │  ├── merchant_of                     └── exists / count                 │
//! │  └── create / update / delete                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (merchants, items)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries are built at runtime and decoded through `FromRow` records, which
//! are then converted into `bazaar_core` types. Ordering is always explicit:
//! lists come back by ascending id.
//!
//! ## Available Repositories
//!
//! - [`MerchantRepository`](merchant::MerchantRepository) - Merchant CRUD and name lookup
//! - [`ItemRepository`](item::ItemRepository) - Item CRUD, search, ownership

pub mod item;
pub mod merchant;
