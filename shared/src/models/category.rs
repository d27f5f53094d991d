//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// `product_count` is computed per read (correlated subquery), never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// URL-safe identifier, derived from `name`, unique
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: i64,
    /// Number of products referencing this category
    #[serde(default)]
    pub product_count: i64,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Update category payload
///
/// Absent fields are left untouched. Sending an empty string for a
/// nullable field clears it (stored as NULL).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    /// Changing the name regenerates the slug
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}
