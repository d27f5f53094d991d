//! Utility module: shared helpers and types

pub mod error;
pub mod logger;
pub mod slug;
pub mod validation;

pub use error::{AppError, AppResult};
