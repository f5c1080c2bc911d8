//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use duckdb::{params_from_iter, AccessMode, Config, Connection};
use std::path::Path;

/// Descriptor that selects an in-memory database
pub const MEMORY_DESCRIPTOR: &str = ":memory:";

/// DuckDB database backend
///
/// Owns its connection outright; a migration run borrows the backend for
/// its whole duration, so no `Mutex` is needed.
pub struct DuckDbBackend {
    conn: Connection,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Open an existing DuckDB file without write access.
    ///
    /// Fails instead of creating the file when it does not exist.
    pub fn read_only(path: &Path) -> DbResult<Self> {
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create from a descriptor string (handles :memory: special case)
    pub fn new(descriptor: &str) -> DbResult<Self> {
        let descriptor = descriptor.trim();
        if descriptor.is_empty() {
            return Err(DbError::ConnectionError(
                "empty database descriptor".to_string(),
            ));
        }
        if descriptor == MEMORY_DESCRIPTOR {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(descriptor))
        }
    }

    /// Borrow the underlying DuckDB connection for application queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn control(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{sql} failed: {e}")))
    }
}

impl Database for DuckDbBackend {
    fn db_type(&self) -> &'static str {
        "duckdb"
    }

    fn query_i64(&self, sql: &str) -> DbResult<i64> {
        let value: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(value)
    }

    fn query_text(&self, sql: &str, params: &[&str]) -> DbResult<String> {
        let value: String = self
            .conn
            .query_row(sql, params_from_iter(params.iter()), |row| row.get(0))?;
        Ok(value)
    }

    fn query_pairs(&self, sql: &str, params: &[&str]) -> DbResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        self.conn
            .execute(sql, params_from_iter(params.iter()))
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = match name.rfind('.') {
            Some(pos) => (&name[..pos], &name[pos + 1..]),
            None => ("main", name),
        };

        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
            [schema, table],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn begin(&self) -> DbResult<()> {
        self.control("BEGIN TRANSACTION")
    }

    fn commit(&self) -> DbResult<()> {
        self.control("COMMIT")
    }

    fn rollback(&self) -> DbResult<()> {
        self.control("ROLLBACK")
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
