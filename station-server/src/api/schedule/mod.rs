//! Reconciled weekly grid

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/schedule/week", get(handler::week))
        .route("/api/schedule/week/summary", get(handler::summary))
}
