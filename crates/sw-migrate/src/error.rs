//! Error types for the migration engine.

use sw_db::DbError;
use thiserror::Error;

/// Migration errors.
///
/// Every variant carrying an `index` refers to a position in the effective
/// plan (bootstrap statements included). The store is left at version
/// `index` when one of those is returned.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Connection could not be opened or failed the liveness probe (M001).
    #[error("[M001] Database connection check failed: {0}")]
    Connection(#[source] DbError),

    /// The version row exists but could not be read (M002).
    #[error("[M002] Failed to read schema version: {0}")]
    VersionRead(#[source] DbError),

    /// The version row holds something other than a non-negative integer (M003).
    #[error("[M003] Stored schema version is not a non-negative integer: '{value}'")]
    CorruptVersion { value: String },

    /// A plan statement failed and was rolled back (M004).
    #[error("[M004] Migration statement {index} failed: {source}")]
    Statement {
        index: usize,
        #[source]
        source: DbError,
    },

    /// Recording the new version failed and the statement was rolled back (M005).
    #[error("[M005] Failed to record schema version {} after statement {index}: {source}", .index + 1)]
    VersionUpdate {
        index: usize,
        #[source]
        source: DbError,
    },

    /// COMMIT failed for a plan statement (M006).
    #[error("[M006] Failed to commit migration statement {index}: {source}")]
    Commit {
        index: usize,
        #[source]
        source: DbError,
    },

    /// The store claims more statements than this program's plan holds (M007).
    #[error(
        "[M007] Database schema version {stored} is ahead of this program's plan ({desired} statements); refusing to run against a newer schema"
    )]
    Downgrade { stored: usize, desired: usize },

    /// A previously applied statement has been edited since it ran (M008).
    #[error(
        "[M008] Migration statement {index} changed after it was applied (stored checksum {stored}, plan checksum {planned})"
    )]
    ChecksumMismatch {
        index: usize,
        stored: String,
        planned: String,
    },

    /// Any other database failure (M009).
    #[error("[M009] Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

impl MigrateError {
    /// Plan index the run stopped at, for errors raised while applying.
    pub fn failed_index(&self) -> Option<usize> {
        match self {
            MigrateError::Statement { index, .. }
            | MigrateError::VersionUpdate { index, .. }
            | MigrateError::Commit { index, .. } => Some(*index),
            _ => None,
        }
    }
}
