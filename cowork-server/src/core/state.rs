use shared::error::AppError;
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::{DbService, seed};

/// Shared server state
///
/// Cheap to clone: the pool is reference counted. Handlers borrow a
/// connection or open a transaction per request.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Open the database, run migrations and seed demo data when enabled
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;

        if config.seed_demo_data {
            seed::seed_demo_data(&db.pool).await?;
        }

        Ok(Self::new(config.clone(), db.pool))
    }
}
