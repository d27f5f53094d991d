//! Storefront content backend
//!
//! Catalog data-access and integrity layer for a small storefront:
//! products grouped into categories, a typed site-configuration store,
//! and an authenticated write path over SQLite.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

/// Load `.env` (best effort) and initialize logging.
pub fn setup_environment(config: &Config) {
    utils::logger::init_logger_with_file(&config.log_level, config.log_dir.as_deref());
}
