//! Shared fixtures: a throwaway RocksDB store and seed helpers

#![allow(dead_code)]

use shared::models::{Position, UserRole};
use station_server::auth::{AccessScope, JwtConfig};
use station_server::db::define_schema;
use station_server::db::models::{
    Employee, EmployeeCreate, Planning, PlanningDraft, Station, StationCreate, User, UserCreate,
    WeekSlots,
};
use station_server::db::repository::{
    EmployeeRepository, PlanningRepository, StationRepository, UserRepository,
};
use station_server::db::{DATABASE, NAMESPACE};
use station_server::{Config, ServerState};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tempfile::TempDir;

/// Fresh database with the schema applied; keep the `TempDir` alive
pub async fn test_db() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns(NAMESPACE).use_db(DATABASE).await.unwrap();
    define_schema(&db).await.unwrap();
    (tmp, db)
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".into(),
        expiration_minutes: 60,
        issuer: "station-server".into(),
        audience: "station-backoffice".into(),
    }
}

pub fn test_state(tmp: &TempDir, db: Surreal<Db>) -> ServerState {
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0, jwt_config());
    ServerState::new(config, db)
}

pub async fn seed_station(db: &Surreal<Db>, name: &str) -> Station {
    StationRepository::new(db.clone())
        .create(StationCreate {
            name: name.into(),
            address: String::new(),
            city: "Lyon".into(),
            phone: String::new(),
            email: String::new(),
            capacity: 0,
            pump_count: 4,
        })
        .await
        .unwrap()
}

/// Employee whose display name is `"{last} {first}"`
pub async fn seed_employee(
    db: &Surreal<Db>,
    last: &str,
    first: &str,
    station: Option<&Station>,
) -> Employee {
    EmployeeRepository::new(db.clone())
        .create(EmployeeCreate {
            last_name: last.into(),
            first_name: first.into(),
            address: String::new(),
            phone: String::new(),
            email: format!(
                "{}.{}@station.fr",
                last.to_lowercase(),
                first.to_lowercase()
            ),
            position: Position::Attendant,
            start_date: None,
            station: station.and_then(|s| s.id.clone()),
            image: String::new(),
        })
        .await
        .unwrap()
}

pub async fn seed_plan(
    db: &Surreal<Db>,
    employee: &Employee,
    station: &Station,
    year: i32,
    week: u32,
    monday: &str,
) -> Planning {
    PlanningRepository::new(db.clone())
        .create(PlanningDraft {
            employee: employee.id.clone().unwrap(),
            employee_name: employee.display_name(),
            slots: WeekSlots {
                monday: Some(monday.into()),
                ..Default::default()
            },
            year,
            week,
            station: station.id.clone().unwrap(),
        })
        .await
        .unwrap()
}

pub async fn seed_user(
    db: &Surreal<Db>,
    email: &str,
    password: &str,
    role: UserRole,
    station: Option<&Station>,
) -> User {
    UserRepository::new(db.clone())
        .create(UserCreate {
            name: email.split('@').next().unwrap_or(email).into(),
            email: email.into(),
            password: password.into(),
            role,
            station: station.and_then(|s| s.id.clone()),
        })
        .await
        .unwrap()
}

pub fn manager_of(station: &Station) -> AccessScope {
    AccessScope::station(station.id.clone())
}
