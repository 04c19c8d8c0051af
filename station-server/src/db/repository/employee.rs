//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate, StationId};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Full roster ordered by last then first name
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY last_name, first_name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    pub async fn find_by_station(&self, station: &StationId) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query(
                "SELECT * FROM employee WHERE station = $station ORDER BY last_name, first_name",
            )
            .bind(("station", station.clone()))
            .await?
            .take(0)?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: &EmployeeId) -> RepoResult<Option<Employee>> {
        let employee: Option<Employee> = self.base.db().select(id.clone()).await?;
        Ok(employee)
    }

    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    last_name = $last_name,
                    first_name = $first_name,
                    address = $address,
                    phone = $phone,
                    email = $email,
                    position = $position,
                    start_date = $start_date,
                    station = $station,
                    image = $image
                RETURN AFTER"#,
            )
            .bind(("last_name", data.last_name))
            .bind(("first_name", data.first_name))
            .bind(("address", data.address))
            .bind(("phone", data.phone))
            .bind(("email", data.email))
            .bind(("position", data.position))
            .bind(("start_date", data.start_date.map(|d| d.to_string())))
            .bind(("station", data.station))
            .bind(("image", data.image))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    pub async fn update(&self, id: &EmployeeId, data: EmployeeUpdate) -> RepoResult<Employee> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    last_name = $last_name OR last_name,
                    first_name = $first_name OR first_name,
                    address = $address OR address,
                    phone = $phone OR phone,
                    email = $email OR email,
                    position = $position OR position,
                    start_date = $start_date OR start_date,
                    station = $station OR station,
                    image = $image OR image
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("last_name", data.last_name))
            .bind(("first_name", data.first_name))
            .bind(("address", data.address))
            .bind(("phone", data.phone))
            .bind(("email", data.email))
            .bind(("position", data.position))
            .bind(("start_date", data.start_date.map(|d| d.to_string())))
            .bind(("station", data.station))
            .bind(("image", data.image))
            .await?;

        let updated: Option<Employee> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    pub async fn delete(&self, id: &EmployeeId) -> RepoResult<bool> {
        let deleted: Option<Employee> = self.base.db().delete(id.clone()).await?;
        Ok(deleted.is_some())
    }
}
