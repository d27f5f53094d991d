//! Product API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Deserializer};

use shared::models::{Product, ProductCreate, ProductFilter, ProductPage, ProductUpdate};

use crate::api::Message;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// Query parameters for `GET /api/products`
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Category slug, exact match
    pub category: Option<String>,
    /// Free-text search token
    pub search: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub limit: Option<i64>,
}

/// Non-numeric paging values fall back to the defaults instead of
/// failing the request.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|s| s.parse().ok()))
}

/// GET /api/products - paged product listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<ProductPage>> {
    let filter = ProductFilter {
        category_slug: query.category,
        search: query.search,
    };
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(12).max(1);
    let result = state.catalog.list_products(&filter, page, limit).await?;
    Ok(Json(result))
}

/// GET /api/products/:id - single product with category
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.get_product(id).await?;
    Ok(Json(product))
}

/// POST /api/products - create product (authenticated)
pub async fn create(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = state
        .catalog
        .create_product(user.as_deref(), payload)
        .await?;
    Ok(Json(product))
}

/// PUT /api/products/:id - partial update (authenticated)
pub async fn update(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state
        .catalog
        .update_product(user.as_deref(), id, payload)
        .await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - unconditional delete (authenticated)
pub async fn delete(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Message>> {
    state.catalog.delete_product(user.as_deref(), id).await?;
    Ok(Json(Message::new("Product deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_tolerates_non_numeric_paging() {
        let q: ProductListQuery =
            serde_json::from_str(r#"{"page":"abc","limit":"5"}"#).unwrap();
        assert_eq!(q.page, None);
        assert_eq!(q.limit, Some(5));

        let q: ProductListQuery = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(q.page, None);
        assert_eq!(q.limit, None);
    }
}
