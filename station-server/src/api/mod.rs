//! HTTP API
//!
//! One router per resource, merged in [`crate::core::build_app`]. Every
//! body is an [`ApiResponse`](shared::ApiResponse).
//!
//! - [`health`] liveness
//! - [`auth`] login, current user, account creation
//! - [`users`] account management (admin)
//! - [`stations`] station CRUD
//! - [`employees`] employee CRUD
//! - [`plannings`] weekly shift plans
//! - [`presences`] attendance records and the presence toggle
//! - [`schedule`] reconciled week and its summary
//! - [`calendar`] ISO week helpers

pub mod auth;
pub mod calendar;
pub mod employees;
pub mod health;
pub mod plannings;
pub mod presences;
pub mod schedule;
pub mod stations;
pub mod users;

use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};

use crate::core::ServerState;
use crate::db::models::StationId;
use crate::db::repository::{RepoError, StationRepository};
use crate::scheduling::{IsoWeek, current_week};

/// `?year=&week=`; a missing part defaults to the current ISO week
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekParams {
    pub year: Option<i32>,
    pub week: Option<u32>,
}

impl WeekParams {
    pub fn resolve(&self) -> AppResult<IsoWeek> {
        let current = current_week();
        IsoWeek::new(
            self.year.unwrap_or(current.year),
            self.week.unwrap_or(current.week),
        )
    }
}

/// Turn a unique-index violation into a domain-specific conflict
pub(crate) fn conflict_as(
    code: ErrorCode,
    message: impl Into<String>,
) -> impl FnOnce(RepoError) -> AppError {
    let message = message.into();
    move |err| match err {
        RepoError::Duplicate(_) => AppError::with_message(code, message),
        other => other.into(),
    }
}

pub(crate) fn not_found(code: ErrorCode, what: &str, id: impl std::fmt::Display) -> AppError {
    AppError::with_message(code, format!("{} {} not found", what, id))
}

pub(crate) async fn ensure_station_exists(state: &ServerState, id: &StationId) -> AppResult<()> {
    StationRepository::new(state.get_db())
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(ErrorCode::StationNotFound, "Station", id))?;
    Ok(())
}
