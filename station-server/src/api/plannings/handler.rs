//! Shift plan handlers
//!
//! Plans are station-owned: scoped callers read and write only their own
//! station's plans. A plan is unique per (employee, year, week).

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
    Planning, PlanningCreate, PlanningDraft, PlanningId, PlanningUpdate, WeekSlots,
};
use crate::db::repository::{EmployeeRepository, PlanningRepository, parse_id};
use crate::scheduling::hours::validate_slot;
use crate::scheduling::{EmployeeLookup, IsoWeek};
use crate::utils::validation::validate_year;

/// Plans of `?year=&week=` within the caller's scope
pub async fn list(
    State(state): State<ServerState>,
    scope: AccessScope,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<ApiResponse<Vec<Planning>>>> {
    let week = params.resolve()?;
    let station = scope.station_filter()?;
    let plans = PlanningRepository::new(state.get_db())
        .find_by_week(week.year, week.week, station.as_ref())
        .await?;
    Ok(Json(ApiResponse::success(plans)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Planning>>> {
    let id = parse_id("planning", &id)?;
    let plan = load(&state, &scope, &id).await?;
    Ok(Json(ApiResponse::success(plan)))
}

pub async fn create(
    State(state): State<ServerState>,
    scope: AccessScope,
    Json(payload): Json<PlanningCreate>,
) -> AppResult<Json<ApiResponse<Planning>>> {
    validate_year(payload.year)?;
    let week = IsoWeek::new(payload.year, payload.week)?;
    validate_slots(&payload.slots)?;

    let employee = EmployeeLookup::from_request(payload.employee, payload.employee_name)?
        .resolve(&EmployeeRepository::new(state.get_db()))
        .await?;
    let employee_id = employee
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Employee record without id"))?;
    let employee_name = employee.display_name();

    // Admins default to the employee's own station
    let requested = match payload.station {
        Some(station) => Some(station),
        None if scope.can_act_any_station => employee.station.clone(),
        None => None,
    };
    let station = scope.write_station(requested)?;
    ensure_station_exists(&state, &station).await?;

    let repo = PlanningRepository::new(state.get_db());
    let already_planned = format!(
        "A planning already exists for {} in week {}/{}",
        employee_name, week.week, week.year
    );
    if repo
        .find_unlinked_by_name(&employee_name, week.year, week.week)
        .await?
        .is_some()
    {
        return Err(AppError::with_message(
            ErrorCode::PlanningAlreadyExists,
            already_planned,
        ));
    }

    let plan = repo
        .create(PlanningDraft {
            employee: employee_id,
            employee_name,
            slots: payload.slots,
            year: week.year,
            week: week.week,
            station,
        })
        .await
        .map_err(conflict_as(ErrorCode::PlanningAlreadyExists, already_planned))?;

    tracing::info!(
        planning = ?plan.id,
        employee = %plan.employee_name,
        year = plan.year,
        week = plan.week,
        "Planning created"
    );
    Ok(Json(ApiResponse::success(plan)))
}

/// Replace the day slots; employee, week and station are fixed
pub async fn update(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
    Json(payload): Json<PlanningUpdate>,
) -> AppResult<Json<ApiResponse<Planning>>> {
    let id = parse_id("planning", &id)?;
    validate_slots(&payload.slots)?;
    load(&state, &scope, &id).await?;

    let plan = PlanningRepository::new(state.get_db())
        .update_slots(&id, payload.slots)
        .await?;
    Ok(Json(ApiResponse::success(plan)))
}

/// Attendance already recorded for that week stays in place
pub async fn delete(
    State(state): State<ServerState>,
    scope: AccessScope,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let id = parse_id("planning", &id)?;
    load(&state, &scope, &id).await?;

    PlanningRepository::new(state.get_db()).delete(&id).await?;
    tracing::info!(planning = %id, "Planning deleted");
    Ok(Json(ApiResponse::success(true)))
}

async fn load(state: &ServerState, scope: &AccessScope, id: &PlanningId) -> AppResult<Planning> {
    let plan = PlanningRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::PlanningNotFound, "Planning", id))?;
    scope.ensure_station(&plan.station)?;
    Ok(plan)
}

fn validate_slots(slots: &WeekSlots) -> AppResult<()> {
    Day::ALL
        .iter()
        .try_for_each(|day| validate_slot(day.slot_key(), slots.get(*day)))
}
