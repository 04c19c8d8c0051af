//! Presence toggle
//!
//! Marks one employee present or absent on one day of a planned week,
//! creating the attendance record on first use and flipping it afterwards.

use shared::error::{AppError, AppResult, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::week::IsoWeek;
use crate::auth::AccessScope;
use crate::db::models::{Employee, EmployeeId, Planning, Presence, PresenceDraft, PresenceToggle};
use crate::db::repository::{
    EmployeeRepository, PlanningRepository, PresenceRepository, RepoError,
};
use crate::utils::validation::validate_year;

/// How a request names the employee
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeLookup {
    Id(EmployeeId),
    /// Display name (`"{last} {first}"`), kept for callers predating ids
    Name(String),
}

impl EmployeeLookup {
    /// Id wins over name; a request naming neither is rejected
    pub fn from_request(
        employee: Option<EmployeeId>,
        employee_name: Option<String>,
    ) -> AppResult<Self> {
        match (employee, employee_name) {
            (Some(id), _) => Ok(EmployeeLookup::Id(id)),
            (None, Some(name)) if !name.trim().is_empty() => {
                Ok(EmployeeLookup::Name(name.trim().to_string()))
            }
            _ => Err(AppError::required("employee")),
        }
    }

    /// Find the employee; on a shared name the first roster entry wins
    pub async fn resolve(&self, employees: &EmployeeRepository) -> AppResult<Employee> {
        match self {
            EmployeeLookup::Id(id) => employees
                .find_by_id(id)
                .await?
                .ok_or_else(|| employee_not_found(&id.to_string())),
            EmployeeLookup::Name(name) => {
                let roster = employees.find_all().await?;
                let mut matches = roster.into_iter().filter(|e| e.display_name() == *name);
                let first = matches.next().ok_or_else(|| employee_not_found(name))?;
                let others = matches.count();
                if others > 0 {
                    tracing::warn!(
                        employee_name = %name,
                        matches = others + 1,
                        "Several employees share this name, using the first"
                    );
                }
                Ok(first)
            }
        }
    }
}

fn employee_not_found(which: &str) -> AppError {
    AppError::with_message(
        ErrorCode::EmployeeNotFound,
        format!("Employee {} not found", which),
    )
}

/// The employee's plan for the week, by link first, then by stored name
async fn find_plan(
    plans: &PlanningRepository,
    employee: &Employee,
    employee_id: &EmployeeId,
    week: IsoWeek,
) -> AppResult<Option<Planning>> {
    if let Some(plan) = plans
        .find_for_employee(employee_id, week.year, week.week)
        .await?
    {
        return Ok(Some(plan));
    }
    Ok(plans
        .find_unlinked_by_name(&employee.display_name(), week.year, week.week)
        .await?)
}

/// Set the present/absent flag of one employee for one day
///
/// Requires a plan for that employee and week; without one nothing is
/// written. An existing record keeps its times and only the flag changes.
/// A new record gets empty times and lands on the caller's station, or on
/// the employee's station for admins.
pub async fn toggle_presence(
    db: &Surreal<Db>,
    scope: &AccessScope,
    request: PresenceToggle,
) -> AppResult<Presence> {
    validate_year(request.year)?;
    let week = IsoWeek::new(request.year, request.week)?;
    let lookup = EmployeeLookup::from_request(request.employee, request.employee_name)?;

    let employees = EmployeeRepository::new(db.clone());
    let plans = PlanningRepository::new(db.clone());
    let presences = PresenceRepository::new(db.clone());

    let employee = lookup.resolve(&employees).await?;
    let employee_id = employee
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Employee record without id"))?;

    let plan = find_plan(&plans, &employee, &employee_id, week)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::PlanningNotFound,
                format!(
                    "No planning for {} in week {}/{}",
                    employee.display_name(),
                    week.week,
                    week.year
                ),
            )
        })?;
    scope.ensure_station(&plan.station)?;

    if let Some(existing) = presences
        .find_one(&employee_id, week.year, week.week, request.day)
        .await?
    {
        return flip(&presences, scope, existing, request.is_present).await;
    }

    let station = if scope.can_act_any_station {
        employee.station.clone()
    } else {
        scope.scope_station_id.clone()
    }
    .ok_or_else(AppError::station_required)?;

    let draft = PresenceDraft {
        week: week.week,
        day: request.day,
        start_time: String::new(),
        end_time: String::new(),
        year: week.year,
        employee: employee_id.clone(),
        station,
        is_present: request.is_present,
    };

    match presences.create(draft).await {
        Ok(created) => {
            tracing::info!(
                employee = %employee_id,
                day = %request.day,
                year = week.year,
                week = week.week,
                is_present = request.is_present,
                "Attendance recorded"
            );
            Ok(created)
        }
        Err(RepoError::Duplicate(_)) => {
            // Lost a race against a concurrent toggle of the same day
            let existing = presences
                .find_one(&employee_id, week.year, week.week, request.day)
                .await?
                .ok_or_else(|| AppError::internal("Attendance record vanished after conflict"))?;
            flip(&presences, scope, existing, request.is_present).await
        }
        Err(e) => Err(e.into()),
    }
}

async fn flip(
    presences: &PresenceRepository,
    scope: &AccessScope,
    existing: Presence,
    is_present: bool,
) -> AppResult<Presence> {
    scope.ensure_station(&existing.station)?;
    let id = existing
        .id
        .ok_or_else(|| AppError::internal("Attendance record without id"))?;
    let updated = presences.set_present(&id, is_present).await?;
    tracing::info!(presence = %id, is_present, "Attendance updated");
    Ok(updated)
}
