//! Station back-office server
//!
//! REST API over an embedded SurrealDB store for stations, employees,
//! weekly shift plans and daily attendance. The weekly grid merging plans
//! with attendance lives in [`scheduling`].
//!
//! ```text
//! station-server/src/
//! ├── core/        # config, state, server
//! ├── auth/        # JWT, middleware, station scope
//! ├── db/          # SurrealDB models and repositories
//! ├── scheduling/  # week arithmetic, merge, hours, toggle
//! ├── api/         # HTTP routes and handlers
//! └── utils/       # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod scheduling;
pub mod utils;

pub use auth::{AccessScope, CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::{init_logger_from_config, init_logger_with_file};

/// Security event on the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and the configuration, then install logging from it
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    init_logger_from_config(&config)?;
    tracing::debug!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        "Configuration loaded"
    );
    Ok(config)
}
