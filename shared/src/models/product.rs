//! Product Model

use serde::{Deserialize, Serialize};

use super::Category;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    /// Primary image URL
    pub image: Option<String>,
    /// Additional image URLs, ordered. Persisted as a JSON text blob
    /// (NULL when empty) and decoded back to a sequence on read.
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning category (required foreign key)
    pub category_id: i64,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub created_at: i64,
    /// Joined category, populated by the repository
    pub category: Option<Category>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Defaults to 0 when absent
    pub stock: Option<i64>,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category_id: i64,
    pub sku: Option<String>,
    pub brand: Option<String>,
}

/// Update product payload
///
/// Absent fields are left untouched. Sending an empty string (or empty
/// sequence for `images`) clears a nullable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub category_id: Option<i64>,
    pub sku: Option<String>,
    pub brand: Option<String>,
}

/// Query filter for product listing
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact match against the linked category's slug
    pub category_slug: Option<String>,
    /// Case-insensitive substring, OR-matched across name/description/sku
    pub search: Option<String>,
}

/// One page of products plus pagination totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}
