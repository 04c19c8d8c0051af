//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::auth::extractor::authenticate;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Routes under `/api/` reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login"];

/// Require a valid bearer token on every `/api/` route
///
/// Skips CORS preflight, non-API paths and [`PUBLIC_API_ROUTES`]. On
/// success the decoded [`CurrentUser`] is inserted into the request
/// extensions.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS
        || !path.starts_with("/api/")
        || PUBLIC_API_ROUTES.contains(&path)
    {
        return Ok(next.run(req).await);
    }

    let token = match req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?
            .to_string(),
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::unauthorized());
        }
    };

    let user = authenticate(&state.get_jwt_service(), &token, req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require the `admin` role; layered on account and station management
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            user_role = user.role.to_string(),
            uri = req.uri().to_string()
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
