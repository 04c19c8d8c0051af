use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::models::UserCreate;
use crate::db::repository::UserRepository;
use shared::models::UserRole;

/// Handles shared by every request
///
/// Cheap to clone: the SurrealDB handle and the JWT service are both
/// reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// Open the database under `{work_dir}/database` and seed the first admin
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_service = DbService::new(&config.database_dir()).await?;
        let state = Self::new(config.clone(), db_service.db);
        state.bootstrap_admin().await?;
        Ok(state)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Create the `ADMIN_EMAIL` account when no user exists yet
    async fn bootstrap_admin(&self) -> Result<()> {
        let (Some(email), Some(password)) = (
            self.config.admin_email.clone(),
            self.config.admin_password.clone(),
        ) else {
            return Ok(());
        };

        let users = UserRepository::new(self.get_db());
        if users.count().await.map_err(shared::AppError::from)? > 0 {
            return Ok(());
        }

        let admin = users
            .create(UserCreate {
                name: "Administrateur".to_string(),
                email,
                password,
                role: UserRole::Admin,
                station: None,
            })
            .await
            .map_err(shared::AppError::from)?;
        tracing::info!(email = %admin.email, "Bootstrap admin account created");
        Ok(())
    }
}
