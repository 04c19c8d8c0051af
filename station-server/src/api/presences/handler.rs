//! Attendance handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::Day;

use crate::api::{WeekParams, conflict_as, ensure_station_exists, not_found};
use crate::auth::AccessScope;
use crate::core::ServerState;
use crate::db::models::{
    Presence, PresenceCreate, PresenceDraft, PresenceId, PresenceToggle, PresenceUpdate,
};
use crate::db::repository::{EmployeeRepository, PresenceRepository, parse_id};
use crate::scheduling::{IsoWeek, toggle_presence};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text, validate_year};

/// Attendance of `?year=&week=` within the caller's scope
pub async fn list(
    State(state): State<ServerState>,
    scope: AccessScope,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<ApiResponse<Vec<Presence>>>> {
    let week = params.resolve()?;
    let station = scope.station_filter()?;
    let presences = PresenceRepository::new(state.get_db())
        .find_by_week(week.year, week.week, station.as_ref())
        .await?;
    Ok(Json(ApiResponse::success(presences)))
}

/// Explicit creation of an attendance record
///
/// Unlike the toggle this needs no plan, but the (employee, year, week,
/// day) slot must still be free.
pub async fn create(
    State(state): State<ServerState>,
    scope: AccessScope,
    Json(payload): Json<PresenceCreate>,
) -> AppResult<Json<ApiResponse<Presence>>> {
    validate_year(payload.year)?;
    let week = IsoWeek::new(payload.year, payload.week)?;
    let day: Day = payload.day.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidDay,
            format!("Invalid day: {}", payload.day),
        )
        .with_detail("day", payload.day.clone())
    })?;
    validate_optional_text(Some(&payload.start_time), "start_time", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(Some(&payload.end_time), "end_time", MAX_SHORT_TEXT_LEN)?;

    let employee = EmployeeRepository::new(state.get_db())
        .find_by_id(&payload.employee)
        .await?
        .ok_or_else(|| not_found(ErrorCode::EmployeeNotFound, "Employee", &payload.employee))?;

    let requested = match payload.station {
        Some(station) => Some(station),
        None if scope.can_act_any_station => employee.station.clone(),
        None => None,
    };
    let station = scope.write_station(requested)?;
    ensure_station_exists(&state, &station).await?;

    let presence = PresenceRepository::new(state.get_db())
        .create(PresenceDraft {
            week: week.week,
            day,
            start_time: payload.start_time.trim().to_string(),
            end_time: payload.end_time.trim().to_string(),
            year: week.year,
            employee: payload.employee,
            station,
            is_present: payload.is_present,
        })
        .await
        .map_err(conflict_as(
            ErrorCode::PresenceAlreadyExists,
            format!(
                "Attendance already recorded for {} on {} of week {}/{}",
                employee.display_name(),
                day,
                week.week,
                week.year
            ),
        ))?;

    Ok(Json(ApiResponse::success(presence)))
}

/// Edit times or the present flag of an existing record
pub async fn update(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
    Json(payload): Json<PresenceUpdate>,
) -> AppResult<Json<ApiResponse<Presence>>> {
    let id = parse_id("presence", &id)?;
    validate_optional_text(payload.start_time.as_deref(), "start_time", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(payload.end_time.as_deref(), "end_time", MAX_SHORT_TEXT_LEN)?;
    load(&state, &scope, &id).await?;

    let presence = PresenceRepository::new(state.get_db())
        .update(&id, payload)
        .await?;
    Ok(Json(ApiResponse::success(presence)))
}

pub async fn delete(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let id = parse_id("presence", &id)?;
    load(&state, &scope, &id).await?;

    PresenceRepository::new(state.get_db()).delete(&id).await?;
    Ok(Json(ApiResponse::success(true)))
}

/// Mark an employee present or absent for one day of a planned week
pub async fn toggle(
    State(state): State<ServerState>,
    scope: AccessScope,
    Json(payload): Json<PresenceToggle>,
) -> AppResult<Json<ApiResponse<Presence>>> {
    let presence = toggle_presence(&state.db, &scope, payload).await?;
    Ok(Json(ApiResponse::success(presence)))
}

async fn load(state: &ServerState, scope: &AccessScope, id: &PresenceId) -> AppResult<Presence> {
    let presence = PresenceRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::PresenceNotFound, "Presence", id))?;
    scope.ensure_station(&presence.station)?;
    Ok(presence)
}
