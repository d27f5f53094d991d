//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//! Wire field names are camelCase to match the public API contract.

pub mod category;
pub mod product;
pub mod site_config;
pub mod user;

// Re-exports
pub use category::*;
pub use product::*;
pub use site_config::*;
pub use user::*;
