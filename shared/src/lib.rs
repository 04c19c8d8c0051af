//! Shared types for the station back office
//!
//! Error codes and the API envelope, domain enums (roles, days, positions)
//! and the auth DTOs used by both the server and its API consumers.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use models::{Day, Position, UserRole};
pub use serde::{Deserialize, Serialize};
