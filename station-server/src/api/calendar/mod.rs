//! ISO week helpers for the planning screens

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/calendar/current", get(handler::current))
        .route("/api/calendar/{year}", get(handler::year))
        .route("/api/calendar/{year}/{week}", get(handler::week))
}
