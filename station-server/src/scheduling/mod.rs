//! Weekly planning and attendance
//!
//! - [`week`] ISO week arithmetic
//! - [`hours`] shift range parsing and hour totals
//! - [`reconcile`] plan + attendance merge
//! - [`summary`] search/sort projection of the merged week
//! - [`toggle`] presence toggle

pub mod hours;
pub mod reconcile;
pub mod summary;
pub mod toggle;
pub mod week;

pub use reconcile::{DayCell, EmployeeWeek, ReconciledWeekView, UNSCHEDULED, reconcile};
pub use summary::{SummaryQuery, WeekSummaryRow, summarize};
pub use toggle::{EmployeeLookup, toggle_presence};
pub use week::{IsoWeek, WeekRange, current_week, week_date_range, week_number_of, weeks_in_year};

use shared::error::AppResult;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::AccessScope;
use crate::db::repository::{
    EmployeeRepository, PlanningRepository, PresenceRepository, StationRepository,
};

/// Load one week's plans and attendance within the caller's scope and merge them
pub async fn build_week_view(
    db: &Surreal<Db>,
    scope: &AccessScope,
    week: IsoWeek,
) -> AppResult<ReconciledWeekView> {
    let range = week.range()?;
    let station = scope.station_filter()?;

    let plans = PlanningRepository::new(db.clone())
        .find_by_week(week.year, week.week, station.as_ref())
        .await?;
    let presences = PresenceRepository::new(db.clone())
        .find_by_week(week.year, week.week, station.as_ref())
        .await?;
    let roster = EmployeeRepository::new(db.clone()).find_all().await?;
    let stations = StationRepository::new(db.clone()).find_all().await?;

    let employees = reconcile(&plans, &presences, &roster, &stations);
    tracing::debug!(
        year = week.year,
        week = week.week,
        plans = plans.len(),
        presences = presences.len(),
        rows = employees.len(),
        "Week reconciled"
    );

    Ok(ReconciledWeekView {
        year: week.year,
        week: week.week,
        range,
        employees,
    })
}
