//! Presence Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{EmployeeId, Presence, PresenceDraft, PresenceId, PresenceUpdate, StationId};
use shared::models::Day;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct PresenceRepository {
    base: BaseRepository,
}

impl PresenceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Attendance of one ISO week, optionally restricted to one station
    pub async fn find_by_week(
        &self,
        year: i32,
        week: u32,
        station: Option<&StationId>,
    ) -> RepoResult<Vec<Presence>> {
        let query = match station {
            Some(_) => {
                "SELECT * FROM presence WHERE year = $year AND week = $week AND station = $station"
            }
            None => "SELECT * FROM presence WHERE year = $year AND week = $week",
        };
        let presences: Vec<Presence> = self
            .base
            .db()
            .query(query)
            .bind(("year", year))
            .bind(("week", week))
            .bind(("station", station.cloned()))
            .await?
            .take(0)?;
        Ok(presences)
    }

    pub async fn find_by_id(&self, id: &PresenceId) -> RepoResult<Option<Presence>> {
        let presence: Option<Presence> = self.base.db().select(id.clone()).await?;
        Ok(presence)
    }

    /// The record for (employee, year, week, day), if any
    pub async fn find_one(
        &self,
        employee: &EmployeeId,
        year: i32,
        week: u32,
        day: Day,
    ) -> RepoResult<Option<Presence>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM presence WHERE employee = $employee AND year = $year AND week = $week AND day = $day LIMIT 1",
            )
            .bind(("employee", employee.clone()))
            .bind(("year", year))
            .bind(("week", week))
            .bind(("day", day.name().to_string()))
            .await?;
        let presences: Vec<Presence> = result.take(0)?;
        Ok(presences.into_iter().next())
    }

    /// Insert a record; a second record for the same (employee, year,
    /// week, day) fails with [`RepoError::Duplicate`] from the unique index
    pub async fn create(&self, draft: PresenceDraft) -> RepoResult<Presence> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE presence SET
                    week = $week,
                    day = $day,
                    start_time = $start_time,
                    end_time = $end_time,
                    year = $year,
                    employee = $employee,
                    station = $station,
                    is_present = $is_present
                RETURN AFTER"#,
            )
            .bind(("week", draft.week))
            .bind(("day", draft.day.name().to_string()))
            .bind(("start_time", draft.start_time))
            .bind(("end_time", draft.end_time))
            .bind(("year", draft.year))
            .bind(("employee", draft.employee))
            .bind(("station", draft.station))
            .bind(("is_present", draft.is_present))
            .await?;

        let created: Option<Presence> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create presence".to_string()))
    }

    /// Set the present/absent flag, leaving the time fields untouched
    pub async fn set_present(&self, id: &PresenceId, is_present: bool) -> RepoResult<Presence> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_present = $is_present RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("is_present", is_present))
            .await?;

        let updated: Option<Presence> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Presence {} not found", id)))
    }

    pub async fn update(&self, id: &PresenceId, data: PresenceUpdate) -> RepoResult<Presence> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    start_time = IF $start_time != NONE THEN $start_time ELSE start_time END,
                    end_time = IF $end_time != NONE THEN $end_time ELSE end_time END,
                    is_present = IF $is_present != NONE THEN $is_present ELSE is_present END
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("start_time", data.start_time))
            .bind(("end_time", data.end_time))
            .bind(("is_present", data.is_present))
            .await?;

        let updated: Option<Presence> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Presence {} not found", id)))
    }

    pub async fn delete(&self, id: &PresenceId) -> RepoResult<bool> {
        let deleted: Option<Presence> = self.base.db().delete(id.clone()).await?;
        Ok(deleted.is_some())
    }
}
