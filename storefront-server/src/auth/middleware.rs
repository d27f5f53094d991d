//! Authentication middleware
//!
//! [`attach_user`] parses the `Authorization: Bearer` header when present
//! and injects a [`CurrentUser`] into the request extensions. It never
//! rejects a request: enforcement happens in the catalog service, which
//! receives the identity as an explicit parameter so read routes stay
//! public and mutations fail with 401 when no identity was attached.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

pub async fn attach_user(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(header) = auth_header
        && let Some(token) = JwtService::extract_from_header(header)
    {
        match state.jwt.validate_token(token) {
            Ok(claims) => match CurrentUser::try_from(claims) {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                }
                Err(e) => {
                    tracing::warn!(target: "security", error = %e, "Malformed JWT claims");
                }
            },
            Err(e) => {
                tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token validation failed");
            }
        }
    }

    next.run(req).await
}
