//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::api::{conflict_as, ensure_station_exists, not_found};
use crate::auth::AccessScope;
use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate};
use crate::db::repository::{EmployeeRepository, parse_id};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_email,
    validate_optional_text, validate_required_text,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub station: Option<String>,
}

/// Roster, optionally filtered by `?station=`; scoped callers only see their station
pub async fn list(
    State(state): State<ServerState>,
    scope: AccessScope,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Employee>>>> {
    let requested = match params.station.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(parse_id("station", raw)?),
        None => None,
    };
    if let Some(station) = &requested {
        scope.ensure_station(station)?;
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employees = match requested.or(scope.station_filter()?) {
        Some(station) => repo.find_by_station(&station).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(ApiResponse::success(employees)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let id = parse_id("employee", &id)?;
    let employee = load(&state, &scope, &id).await?;
    Ok(Json(ApiResponse::success(employee)))
}

pub async fn create(
    State(state): State<ServerState>,
    scope: AccessScope,
    Json(mut payload): Json<EmployeeCreate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_optional_text(Some(&payload.address), "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(Some(&payload.phone), "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(Some(&payload.image), "image", MAX_URL_LEN)?;

    // Admins may leave an employee unassigned; managers hire into their station
    payload.station = if scope.can_act_any_station {
        payload.station
    } else {
        Some(scope.write_station(payload.station)?)
    };
    if let Some(station) = &payload.station {
        ensure_station_exists(&state, station).await?;
    }
    payload.last_name = payload.last_name.trim().to_string();
    payload.first_name = payload.first_name.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    let employee = EmployeeRepository::new(state.get_db())
        .create(payload)
        .await
        .map_err(conflict_as(
            ErrorCode::EmployeeEmailExists,
            "Employee email already exists",
        ))?;

    tracing::info!(employee = ?employee.id, name = %employee.display_name(), "Employee created");
    Ok(Json(ApiResponse::success(employee)))
}

pub async fn update(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
    Json(mut payload): Json<EmployeeUpdate>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let id = parse_id("employee", &id)?;
    validate_optional_text(payload.last_name.as_deref(), "last_name", MAX_NAME_LEN)?;
    validate_optional_text(payload.first_name.as_deref(), "first_name", MAX_NAME_LEN)?;
    validate_optional_text(payload.phone.as_deref(), "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(payload.address.as_deref(), "address", MAX_ADDRESS_LEN)?;
    if let Some(email) = &payload.email {
        validate_email(email)?;
        payload.email = Some(email.trim().to_lowercase());
    }

    load(&state, &scope, &id).await?;
    if let Some(station) = &payload.station {
        scope.ensure_station(station)?;
        ensure_station_exists(&state, station).await?;
    }

    let employee = EmployeeRepository::new(state.get_db())
        .update(&id, payload)
        .await
        .map_err(conflict_as(
            ErrorCode::EmployeeEmailExists,
            "Employee email already exists",
        ))?;
    Ok(Json(ApiResponse::success(employee)))
}

/// Hard delete; existing plans keep the name snapshot
pub async fn delete(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let id = parse_id("employee", &id)?;
    load(&state, &scope, &id).await?;

    EmployeeRepository::new(state.get_db()).delete(&id).await?;
    tracing::info!(employee = %id, "Employee deleted");
    Ok(Json(ApiResponse::success(true)))
}

/// Fetch an employee the caller may act on
async fn load(state: &ServerState, scope: &AccessScope, id: &EmployeeId) -> AppResult<Employee> {
    let employee = EmployeeRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::EmployeeNotFound, "Employee", id))?;

    if !scope.can_act_any_station {
        match &employee.station {
            Some(station) => scope.ensure_station(station)?,
            None => return Err(AppError::station_scope_denied()),
        }
    }
    Ok(employee)
}
