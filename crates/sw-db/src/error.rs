//! Error types for sw-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Query returned no rows (D003)
    ///
    /// Sentinel for "no existing record": callers match on this variant to
    /// take a create-if-missing branch instead of treating it as a failure.
    #[error("[D003] Query returned no rows")]
    NotFound,

    /// BEGIN / COMMIT / ROLLBACK failed (D004)
    #[error("[D004] Transaction failed: {0}")]
    TransactionError(String),

    /// Internal error (D005)
    #[error("[D005] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// True for the "no rows" sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound)
    }
}

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        match err {
            duckdb::Error::QueryReturnedNoRows => DbError::NotFound,
            other => DbError::ExecutionError(other.to_string()),
        }
    }
}
