//! User management Handlers

use axum::{Extension, Json, extract::State};

use shared::models::{UserCreate, UserInfo};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/users - create a back-office user (admin only)
pub async fn create(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserInfo>> {
    let created = state.catalog.create_user(user.as_deref(), payload).await?;
    Ok(Json(created.into()))
}
