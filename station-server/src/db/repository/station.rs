//! Station Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Station, StationCreate, StationId, StationUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct StationRepository {
    base: BaseRepository,
}

impl StationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Station>> {
        let stations: Vec<Station> = self
            .base
            .db()
            .query("SELECT * FROM station ORDER BY name")
            .await?
            .take(0)?;
        Ok(stations)
    }

    pub async fn find_by_id(&self, id: &StationId) -> RepoResult<Option<Station>> {
        let station: Option<Station> = self.base.db().select(id.clone()).await?;
        Ok(station)
    }

    pub async fn create(&self, data: StationCreate) -> RepoResult<Station> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE station SET
                    name = $name,
                    address = $address,
                    city = $city,
                    phone = $phone,
                    email = $email,
                    capacity = $capacity,
                    pump_count = $pump_count
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("address", data.address))
            .bind(("city", data.city))
            .bind(("phone", data.phone))
            .bind(("email", data.email))
            .bind(("capacity", data.capacity))
            .bind(("pump_count", data.pump_count))
            .await?;

        let created: Option<Station> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create station".to_string()))
    }

    pub async fn update(&self, id: &StationId, data: StationUpdate) -> RepoResult<Station> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("data", data))
            .await?;

        let updated: Option<Station> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Station {} not found", id)))
    }

    /// Hard delete; plans and attendance keep their dangling reference
    pub async fn delete(&self, id: &StationId) -> RepoResult<bool> {
        let deleted: Option<Station> = self.base.db().delete(id.clone()).await?;
        Ok(deleted.is_some())
    }
}
