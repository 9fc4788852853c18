//! Repository Module
//!
//! Plain async functions over a `SqliteConnection`, so the same call works
//! on a pooled connection or inside a transaction.

pub mod booking;
pub mod device;
pub mod room;
pub mod workspace;

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::money;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// The store rejected the write (foreign key, check, unique, not null)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Version conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        RepoError::NotFound {
            code,
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => RepoError::Constraint(db_err.message().to_string()),
                _ => RepoError::Database(err.to_string()),
            },
            sqlx::Error::RowNotFound => RepoError::not_found(ErrorCode::NotFound, "Row not found"),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { code, message } => AppError::with_message(code, message),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Constraint(msg) => AppError::constraint(msg),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Convert an amount to stored cents
pub(crate) fn cents(field: &str, amount: Decimal) -> RepoResult<i64> {
    money::to_cents(amount)
        .ok_or_else(|| RepoError::Validation(format!("{field} is out of range")))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_to_app_error() {
        let err: AppError =
            RepoError::not_found(ErrorCode::RoomNotInWorkspace, "Room 4 is not in workspace 1")
                .into();
        assert_eq!(err.code, ErrorCode::RoomNotInWorkspace);
        assert_eq!(err.message, "Room 4 is not in workspace 1");

        let err: AppError = RepoError::Constraint("CHECK constraint failed".into()).into();
        assert_eq!(err.code, ErrorCode::ConstraintViolation);
        assert_eq!(err.message, "CHECK constraint failed");

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database error");
    }

    #[tokio::test]
    async fn test_sqlx_check_violation_is_constraint() {
        let pool = test_support::test_pool().await;
        sqlx::query("INSERT INTO workspace (name) VALUES ('Hub')")
            .execute(&pool)
            .await
            .unwrap();
        let err = sqlx::query(
            "INSERT INTO room (workspace_id, name, capacity, price_per_hour_cents) VALUES (1, 'Big', 5000, 0)",
        )
        .execute(&pool)
        .await
        .unwrap_err();
        assert!(matches!(RepoError::from(err), RepoError::Constraint(_)));
    }
}
