//! Database error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An employee with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid goal status: {0}")]
    InvalidStatus(String),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// True when the underlying Postgres error is a unique-constraint violation
/// (SQLSTATE 23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.code().as_deref() == Some("23505"))
}
