//! Site configuration API Handlers

use std::collections::BTreeMap;

use axum::{Extension, Json, extract::State};

use shared::models::{SiteConfig, SiteConfigUpsert};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/config - flat key/value map of every entry
pub async fn get_all(
    State(state): State<ServerState>,
) -> AppResult<Json<BTreeMap<String, String>>> {
    let map = state.catalog.get_config().await?;
    Ok(Json(map))
}

/// POST /api/config - upsert one entry (authenticated)
pub async fn upsert(
    State(state): State<ServerState>,
    user: Option<Extension<CurrentUser>>,
    Json(payload): Json<SiteConfigUpsert>,
) -> AppResult<Json<SiteConfig>> {
    let entry = state.catalog.upsert_config(user.as_deref(), payload).await?;
    Ok(Json(entry))
}
