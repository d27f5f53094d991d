//! Site configuration API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/config", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get_all).post(handler::upsert))
}
