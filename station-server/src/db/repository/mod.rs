//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod employee;
pub mod planning;
pub mod presence;
pub mod station;
pub mod user;

// Re-exports
pub use employee::EmployeeRepository;
pub use planning::PlanningRepository;
pub use presence::PresenceRepository;
pub use station::StationRepository;
pub use user::UserRepository;

use shared::error::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // Unique index violation: "Database index `x` already contains ..."
        if message.contains("already contains") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: every id crossing the API is a "table:key" string.
//   - parse:   parse_id("employee", "employee:abc")
//   - CRUD:    db.select(id) / DELETE $thing with a RecordId
// =============================================================================

/// Parse a `"table:key"` id, rejecting ids of another table
pub fn parse_id(table: &str, id: &str) -> RepoResult<RecordId> {
    crate::db::models::serde_helpers::parse_record_id(table, id)
        .ok_or_else(|| RepoError::Validation(format!("Invalid {} ID: {}", table, id)))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_maps_to_app_error() {
        let err: AppError = RepoError::Duplicate("dup".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        let err: AppError = RepoError::Database("boom".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err: AppError = RepoError::Validation("bad id".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("planning", "planning:abc").is_ok());
        assert!(matches!(
            parse_id("planning", "presence:abc"),
            Err(RepoError::Validation(_))
        ));
    }
}
