//! Category API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::api::Message;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/categories - all categories with product counts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// GET /api/categories/:id - single category
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = state.catalog.get_category(id).await?;
    Ok(Json(category))
}

/// POST /api/categories - create category, slug derived from name (authenticated)
pub async fn create(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let category = state
        .catalog
        .create_category(user.as_deref(), payload)
        .await?;
    Ok(Json(category))
}

/// PUT /api/categories/:id - partial update; a new name regenerates the slug (authenticated)
pub async fn update(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let category = state
        .catalog
        .update_category(user.as_deref(), id, payload)
        .await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - refused while products reference it (authenticated)
pub async fn delete(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Message>> {
    state.catalog.delete_category(user.as_deref(), id).await?;
    Ok(Json(Message::new("Category deleted")))
}
