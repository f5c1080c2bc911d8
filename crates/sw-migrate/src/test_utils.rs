//! Shared test utilities for sw-migrate

use std::cell::{Cell, RefCell};
use sw_db::{Database, DbError, DbResult, DuckDbBackend};

/// Backend wrapper that records every plan statement it executes and can
/// inject failures at the points a migration run depends on.
pub struct RecordingDb<D = DuckDbBackend> {
    inner: D,
    executed: RefCell<Vec<String>>,
    fail_liveness: Cell<bool>,
    liveness_value: Cell<Option<i64>>,
    fail_begins: Cell<bool>,
    fail_version_reads: Cell<bool>,
    fail_version_updates: Cell<bool>,
    fail_commits: Cell<bool>,
}

impl RecordingDb<DuckDbBackend> {
    /// Wrap a fresh in-memory DuckDB database
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::new(DuckDbBackend::in_memory()?))
    }
}

impl<D: Database> RecordingDb<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            executed: RefCell::new(Vec::new()),
            fail_liveness: Cell::new(false),
            liveness_value: Cell::new(None),
            fail_begins: Cell::new(false),
            fail_version_reads: Cell::new(false),
            fail_version_updates: Cell::new(false),
            fail_commits: Cell::new(false),
        }
    }

    /// Statements passed to `execute_batch`, in call order
    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    /// Forget recorded statements
    pub fn clear(&self) {
        self.executed.borrow_mut().clear();
    }

    /// Make the `SELECT 0` liveness query fail as if the connection were gone
    pub fn fail_liveness(&self, fail: bool) {
        self.fail_liveness.set(fail);
    }

    /// Make the `SELECT 0` liveness query answer `value` instead
    pub fn liveness_value(&self, value: i64) {
        self.liveness_value.set(Some(value));
    }

    /// Make `BEGIN` fail before anything runs
    pub fn fail_begins(&self, fail: bool) {
        self.fail_begins.set(fail);
    }

    /// Make `query_text` fail as if the transport dropped
    pub fn fail_version_reads(&self, fail: bool) {
        self.fail_version_reads.set(fail);
    }

    /// Make writes to the version row fail
    pub fn fail_version_updates(&self, fail: bool) {
        self.fail_version_updates.set(fail);
    }

    /// Make `COMMIT` fail without committing
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.set(fail);
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Database> Database for RecordingDb<D> {
    fn db_type(&self) -> &'static str {
        self.inner.db_type()
    }

    fn query_i64(&self, sql: &str) -> DbResult<i64> {
        if self.fail_liveness.get() {
            return Err(DbError::ConnectionError(
                "simulated lost connection".to_string(),
            ));
        }
        match self.liveness_value.get() {
            Some(value) => Ok(value),
            None => self.inner.query_i64(sql),
        }
    }

    fn query_text(&self, sql: &str, params: &[&str]) -> DbResult<String> {
        if self.fail_version_reads.get() {
            return Err(DbError::ExecutionError(
                "simulated read failure".to_string(),
            ));
        }
        self.inner.query_text(sql, params)
    }

    fn query_pairs(&self, sql: &str, params: &[&str]) -> DbResult<Vec<(String, String)>> {
        self.inner.query_pairs(sql, params)
    }

    fn execute(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        if self.fail_version_updates.get() && sql.contains("key = 'version'") {
            return Err(DbError::ExecutionError(
                "simulated version update failure".to_string(),
            ));
        }
        self.inner.execute(sql, params)
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.executed.borrow_mut().push(sql.to_string());
        self.inner.execute_batch(sql)
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.inner.relation_exists(name)
    }

    fn begin(&self) -> DbResult<()> {
        if self.fail_begins.get() {
            return Err(DbError::TransactionError(
                "simulated begin failure".to_string(),
            ));
        }
        self.inner.begin()
    }

    fn commit(&self) -> DbResult<()> {
        if self.fail_commits.get() {
            return Err(DbError::TransactionError(
                "simulated commit failure".to_string(),
            ));
        }
        self.inner.commit()
    }

    fn rollback(&self) -> DbResult<()> {
        self.inner.rollback()
    }
}
