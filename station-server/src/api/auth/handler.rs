//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::api::{conflict_as, not_found};
use crate::auth::{CurrentUser, TokenSubject};
use crate::core::ServerState;
use crate::db::models::UserCreate;
use crate::db::repository::{StationRepository, UserRepository, parse_id};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};

/// Every login attempt takes at least this long, found or not
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Email + password → token and account info
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let users = UserRepository::new(state.get_db());
    let user = users.find_by_email(&req.email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(user) => {
            let valid = user
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.clone(),
                    reason = "invalid_password"
                );
                return Err(AppError::invalid_credentials());
            }
            user
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "unknown_email"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let info = user.info();
    let token = state
        .get_jwt_service()
        .generate_token(TokenSubject {
            user_id: &info.id,
            email: &info.email,
            name: &info.name,
            role: info.role,
            station: info.station.as_deref(),
        })
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %info.id, role = %info.role, "User logged in");

    Ok(Json(ApiResponse::success(LoginResponse { token, user: info })))
}

/// Account of the token holder, read fresh from the database
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let id = parse_id("user", &current.id)?;
    let user = UserRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User", &id))?;
    Ok(Json(ApiResponse::success(user.info())))
}

/// Create an account (admin)
///
/// Station-scoped roles must name an existing station.
pub async fn register(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let station = match req.station.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => {
            let id = parse_id("station", raw)?;
            StationRepository::new(state.get_db())
                .find_by_id(&id)
                .await?
                .ok_or_else(|| not_found(ErrorCode::StationNotFound, "Station", &id))?;
            Some(id)
        }
        None => None,
    };
    if !req.role.is_admin() && station.is_none() {
        return Err(AppError::station_required());
    }

    let user = UserRepository::new(state.get_db())
        .create(UserCreate {
            name: req.name.trim().to_string(),
            email: req.email,
            password: req.password,
            role: req.role,
            station,
        })
        .await
        .map_err(conflict_as(ErrorCode::UserEmailExists, "Email already in use"))?;

    let info = user.info();
    tracing::info!(created = %info.id, role = %info.role, by = %current.id, "User registered");
    Ok(Json(ApiResponse::success(info)))
}
