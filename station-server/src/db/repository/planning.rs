//! Planning Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{EmployeeId, Planning, PlanningDraft, PlanningId, StationId, WeekSlots};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct PlanningRepository {
    base: BaseRepository,
}

impl PlanningRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Plans of one ISO week, optionally restricted to one station
    pub async fn find_by_week(
        &self,
        year: i32,
        week: u32,
        station: Option<&StationId>,
    ) -> RepoResult<Vec<Planning>> {
        let query = match station {
            Some(_) => {
                "SELECT * FROM planning WHERE year = $year AND week = $week AND station = $station ORDER BY employee_name"
            }
            None => "SELECT * FROM planning WHERE year = $year AND week = $week ORDER BY employee_name",
        };
        let plans: Vec<Planning> = self
            .base
            .db()
            .query(query)
            .bind(("year", year))
            .bind(("week", week))
            .bind(("station", station.cloned()))
            .await?
            .take(0)?;
        Ok(plans)
    }

    pub async fn find_by_id(&self, id: &PlanningId) -> RepoResult<Option<Planning>> {
        let plan: Option<Planning> = self.base.db().select(id.clone()).await?;
        Ok(plan)
    }

    /// The plan linked to `employee` for (year, week)
    pub async fn find_for_employee(
        &self,
        employee: &EmployeeId,
        year: i32,
        week: u32,
    ) -> RepoResult<Option<Planning>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM planning WHERE employee = $employee AND year = $year AND week = $week LIMIT 1",
            )
            .bind(("employee", employee.clone()))
            .bind(("year", year))
            .bind(("week", week))
            .await?;
        let plans: Vec<Planning> = result.take(0)?;
        Ok(plans.into_iter().next())
    }

    /// Plans carrying no employee link, matched on the stored name
    pub async fn find_unlinked_by_name(
        &self,
        employee_name: &str,
        year: i32,
        week: u32,
    ) -> RepoResult<Option<Planning>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM planning WHERE employee = NONE AND employee_name = $name AND year = $year AND week = $week LIMIT 1",
            )
            .bind(("name", employee_name.to_string()))
            .bind(("year", year))
            .bind(("week", week))
            .await?;
        let plans: Vec<Planning> = result.take(0)?;
        Ok(plans.into_iter().next())
    }

    /// Insert a plan; a second plan for the same (employee, year, week)
    /// fails with [`RepoError::Duplicate`] from the unique index
    pub async fn create(&self, draft: PlanningDraft) -> RepoResult<Planning> {
        let slots = draft.slots.normalized();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE planning SET
                    employee = $employee,
                    employee_name = $employee_name,
                    monday = $monday,
                    tuesday = $tuesday,
                    wednesday = $wednesday,
                    thursday = $thursday,
                    friday = $friday,
                    saturday = $saturday,
                    sunday = $sunday,
                    year = $year,
                    week = $week,
                    station = $station
                RETURN AFTER"#,
            )
            .bind(("employee", draft.employee))
            .bind(("employee_name", draft.employee_name))
            .bind(("monday", slots.monday))
            .bind(("tuesday", slots.tuesday))
            .bind(("wednesday", slots.wednesday))
            .bind(("thursday", slots.thursday))
            .bind(("friday", slots.friday))
            .bind(("saturday", slots.saturday))
            .bind(("sunday", slots.sunday))
            .bind(("year", draft.year))
            .bind(("week", draft.week))
            .bind(("station", draft.station))
            .await?;

        let created: Option<Planning> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create planning".to_string()))
    }

    /// Replace the seven day slots
    pub async fn update_slots(&self, id: &PlanningId, slots: WeekSlots) -> RepoResult<Planning> {
        let slots = slots.normalized();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    monday = $monday,
                    tuesday = $tuesday,
                    wednesday = $wednesday,
                    thursday = $thursday,
                    friday = $friday,
                    saturday = $saturday,
                    sunday = $sunday
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("monday", slots.monday))
            .bind(("tuesday", slots.tuesday))
            .bind(("wednesday", slots.wednesday))
            .bind(("thursday", slots.thursday))
            .bind(("friday", slots.friday))
            .bind(("saturday", slots.saturday))
            .bind(("sunday", slots.sunday))
            .await?;

        let updated: Option<Planning> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Planning {} not found", id)))
    }

    /// Hard delete; attendance records of that week are left in place
    pub async fn delete(&self, id: &PlanningId) -> RepoResult<bool> {
        let deleted: Option<Planning> = self.base.db().delete(id.clone()).await?;
        Ok(deleted.is_some())
    }
}
