//! Shared types for the storefront backend
//!
//! Data models and request/response DTOs used by both the server and
//! any API client. DB row derives are feature-gated behind `db` so a
//! pure client build does not pull in sqlx.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
