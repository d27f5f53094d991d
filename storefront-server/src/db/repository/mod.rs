//! Repository Module
//!
//! CRUD operations over the SQLite tables. Repositories are free
//! functions taking `&SqlitePool`; multi-step mutations open their own
//! transaction.

pub mod category;
pub mod product;
pub mod site_config;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Dependent-entity violation, e.g. deleting a category that still
    /// has products.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // A UNIQUE constraint violation is a conflict, not a storage failure;
        // the schema's uniqueness constraints are the source of truth.
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
