//! Database Module
//!
//! Handles the SQLite connection pool, migrations and demo seeding

pub mod repository;
pub mod seed;

use shared::error::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

/// Database service owning the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database with WAL mode and foreign keys, then migrate
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database url: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            // wait on write contention instead of failing immediately
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(
            database_url,
            max_connections,
            "Database connection established (SQLite WAL, busy_timeout=5000ms)"
        );

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// Single-connection in-memory database, used by tests
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool
    /// keeps exactly one connection alive forever.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::config(format!("Invalid database url: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[tokio::test]
    async fn test_file_database_migrates_once() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("cowork.db").display());

        let first = DbService::new(&url, 2).await.unwrap();
        first.pool.close().await;

        // Re-opening applies nothing new and keeps the schema
        let second = DbService::new(&url, 2).await.unwrap();
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('workspace', 'room', 'device', 'booking')",
        )
        .fetch_one(&second.pool)
        .await
        .unwrap();
        assert_eq!(tables, 4);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = DbService::open_in_memory().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO room (workspace_id, name, capacity, price_per_hour_cents) VALUES (999, 'Orphan', 2, 0)",
        )
        .execute(&db.pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_bad_url_is_config_error() {
        let err = DbService::new("sqlite:cowork.db?flavor=vanilla", 1)
            .await
            .err()
            .unwrap();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(err.message.starts_with("Invalid database url"));
    }
}
