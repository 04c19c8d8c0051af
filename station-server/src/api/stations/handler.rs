//! Station API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppResult, ErrorCode};

use crate::api::not_found;
use crate::core::ServerState;
use crate::db::models::{Station, StationCreate, StationUpdate};
use crate::db::repository::{StationRepository, parse_id};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};

pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Station>>>> {
    let stations = StationRepository::new(state.get_db()).find_all().await?;
    Ok(Json(ApiResponse::success(stations)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Station>>> {
    let id = parse_id("station", &id)?;
    let station = StationRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::StationNotFound, "Station", &id))?;
    Ok(Json(ApiResponse::success(station)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StationCreate>,
) -> AppResult<Json<ApiResponse<Station>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(Some(&payload.address), "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(Some(&payload.city), "city", MAX_NAME_LEN)?;
    validate_optional_text(Some(&payload.phone), "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(Some(&payload.email), "email", MAX_EMAIL_LEN)?;

    let station = StationRepository::new(state.get_db()).create(payload).await?;
    tracing::info!(station = ?station.id, name = %station.name, "Station created");
    Ok(Json(ApiResponse::success(station)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StationUpdate>,
) -> AppResult<Json<ApiResponse<Station>>> {
    let id = parse_id("station", &id)?;
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(payload.address.as_deref(), "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(payload.phone.as_deref(), "phone", MAX_SHORT_TEXT_LEN)?;

    let repo = StationRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::StationNotFound, "Station", &id))?;
    let station = repo.update(&id, payload).await?;
    Ok(Json(ApiResponse::success(station)))
}

/// Hard delete; employees, plans and attendance keep their reference
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let id = parse_id("station", &id)?;
    if !StationRepository::new(state.get_db()).delete(&id).await? {
        return Err(not_found(ErrorCode::StationNotFound, "Station", &id));
    }
    tracing::info!(station = %id, "Station deleted");
    Ok(Json(ApiResponse::success(true)))
}
