//! Account management handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::{UserInfo, UserUpdateRequest};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::api::{conflict_as, not_found};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserUpdate;
use crate::db::repository::{StationRepository, UserRepository, parse_id};
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_optional_text, validate_password,
};

pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<UserInfo>>>> {
    let users = UserRepository::new(state.get_db()).find_all().await?;
    Ok(Json(ApiResponse::success(
        users.iter().map(|u| u.info()).collect(),
    )))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UserUpdateRequest>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let id = parse_id("user", &id)?;
    validate_optional_text(req.name.as_deref(), "name", MAX_NAME_LEN)?;
    if let Some(email) = &req.email {
        validate_email(email)?;
    }
    if let Some(password) = &req.password {
        validate_password(password)?;
    }

    let repo = UserRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User", &id))?;

    let station = match req.station.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => {
            let station = parse_id("station", raw)?;
            StationRepository::new(state.get_db())
                .find_by_id(&station)
                .await?
                .ok_or_else(|| not_found(ErrorCode::StationNotFound, "Station", &station))?;
            Some(station)
        }
        None => None,
    };

    let role = req.role.unwrap_or(existing.role);
    if !role.is_admin() && station.is_none() && existing.station.is_none() {
        return Err(AppError::station_required());
    }

    let user = repo
        .update(
            &id,
            UserUpdate {
                name: req.name.map(|n| n.trim().to_string()),
                email: req.email,
                password: req.password,
                role: req.role,
                station,
            },
        )
        .await
        .map_err(conflict_as(ErrorCode::UserEmailExists, "Email already in use"))?;

    tracing::info!(user = %id, "User updated");
    Ok(Json(ApiResponse::success(user.info())))
}

/// Delete an account; admins cannot delete their own
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let id = parse_id("user", &id)?;
    if id.to_string() == current.id {
        return Err(AppError::validation("You cannot delete your own account"));
    }

    let deleted = UserRepository::new(state.get_db()).delete(&id).await?;
    if !deleted {
        return Err(not_found(ErrorCode::UserNotFound, "User", &id));
    }
    tracing::info!(user = %id, by = %current.id, "User deleted");
    Ok(Json(ApiResponse::success(true)))
}
