//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus the schema definitions applied
//! on every start. Uniqueness of plans and attendance records lives in the
//! schema as unique indexes. Plans are keyed by `employee_key`, computed on
//! every write, so rows without an employee link stay unique per name.

pub mod models;
pub mod repository;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

pub const NAMESPACE: &str = "station";
pub const DATABASE: &str = "backoffice";

/// Tables and indexes, idempotent
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS station SCHEMALESS;
DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE TABLE IF NOT EXISTS planning SCHEMALESS;
DEFINE TABLE IF NOT EXISTS presence SCHEMALESS;

DEFINE INDEX IF NOT EXISTS employee_email ON TABLE employee FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS employee_station ON TABLE employee FIELDS station;
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
-- Plan identity: the employee link, or the stored name for unlinked rows
DEFINE FIELD IF NOT EXISTS employee_key ON TABLE planning
    VALUE IF employee THEN <string> employee ELSE string::concat("name:", employee_name) END;
REMOVE INDEX IF EXISTS planning_employee_week ON TABLE planning;
UPDATE planning
    SET employee_key = IF employee THEN <string> employee ELSE string::concat("name:", employee_name) END
    WHERE employee_key = NONE;
DEFINE INDEX IF NOT EXISTS planning_employee_key_week ON TABLE planning FIELDS employee_key, year, week UNIQUE;
DEFINE INDEX IF NOT EXISTS planning_week ON TABLE planning FIELDS year, week;
DEFINE INDEX IF NOT EXISTS presence_employee_day ON TABLE presence FIELDS employee, year, week, day UNIQUE;
DEFINE INDEX IF NOT EXISTS presence_week ON TABLE presence FIELDS year, week;
"#;

/// Database service, owns the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB store at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB RocksDB)");

        define_schema(&db).await?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}

/// Apply table and index definitions to an already selected database
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .and_then(|response| response.check())
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
    Ok(())
}
