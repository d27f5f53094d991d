//! Site Configuration Repository
//!
//! Key/value store for site-wide settings (logo, phone, socials, ...).
//! Upsert-only: there is no delete operation.

use shared::models::{SiteConfig, SiteConfigUpsert};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

/// Fetch every config entry, ordered by key for stable output.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<SiteConfig>> {
    let entries = sqlx::query_as::<_, SiteConfig>(
        "SELECT key, value, type FROM site_config ORDER BY key",
    )
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// Fetch a single entry by key
pub async fn find_by_key(pool: &SqlitePool, key: &str) -> RepoResult<Option<SiteConfig>> {
    let entry =
        sqlx::query_as::<_, SiteConfig>("SELECT key, value, type FROM site_config WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;
    Ok(entry)
}

/// Create the entry if the key is new, otherwise replace value and type
/// in place. The value may be an empty string but must be supplied.
pub async fn upsert(pool: &SqlitePool, data: SiteConfigUpsert) -> RepoResult<SiteConfig> {
    if data.key.trim().is_empty() {
        return Err(RepoError::Validation("key must not be empty".into()));
    }

    sqlx::query(
        "INSERT INTO site_config (key, value, type) VALUES (?, ?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, type = excluded.type",
    )
    .bind(&data.key)
    .bind(&data.value)
    .bind(&data.value_type)
    .execute(pool)
    .await?;

    find_by_key(pool, &data.key)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert config entry".into()))
}
