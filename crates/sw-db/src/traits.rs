//! Database trait definition

use crate::error::DbResult;

/// The connection handle the migration engine drives.
///
/// Implementations own a single live connection. Every call is a blocking
/// round-trip; there is no internal parallelism. Positional parameters are
/// bound as text, which is all the version store needs.
pub trait Database {
    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Run a query returning a single integer (e.g. the `SELECT 0` liveness probe)
    fn query_i64(&self, sql: &str) -> DbResult<i64>;

    /// Run a query returning a single text value.
    ///
    /// Returns [`crate::DbError::NotFound`] when the query yields no rows.
    fn query_text(&self, sql: &str, params: &[&str]) -> DbResult<String>;

    /// Run a query returning two text columns per row
    fn query_pairs(&self, sql: &str, params: &[&str]) -> DbResult<Vec<(String, String)>>;

    /// Execute one parameterised statement, returns affected rows
    fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize>;

    /// Execute SQL text verbatim (may contain several statements)
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Start a transaction
    fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    fn rollback(&self) -> DbResult<()>;
}
