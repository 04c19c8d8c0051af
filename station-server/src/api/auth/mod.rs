//! Authentication Routes

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

/// - `/api/auth/login`: public (skipped by `require_auth`)
/// - `/api/auth/me`: any authenticated account
/// - `/api/auth/register`: admin only
pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/auth/register", post(handler::register))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
        .merge(admin_routes)
}
