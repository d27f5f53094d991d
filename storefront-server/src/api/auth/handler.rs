//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};

use shared::client::{LoginRequest, LoginResponse};

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login - verify credentials, return a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = user::find_by_email(&state.db, &req.email)
        .await
        .map_err(AppError::from)?;

    // Fixed delay before inspecting the result, so a missing account and
    // a wrong password are indistinguishable by response time
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let Some(account) = found else {
        tracing::warn!(target: "security", email = %req.email, "Login failed - user not found");
        return Err(AppError::invalid_credentials());
    };

    let password_valid = user::verify_password(&req.password, &account.password_hash)
        .map_err(AppError::from)?;
    if !password_valid {
        tracing::warn!(target: "security", email = %req.email, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt
        .generate_token(&account)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    tracing::info!(email = %account.email, "Login successful");

    Ok(Json(LoginResponse {
        token,
        user: account.into(),
    }))
}
