//! Migrated database handle.
//!
//! [`SchemaDb`] bundles a live backend with the plan it was migrated to.
//! Construct one per process (or per test) instead of sharing globals.

use crate::config::MigrateConfig;
use crate::error::{MigrateError, MigrateResult};
use crate::plan::Plan;
use crate::runner::{self, MigrationOutcome, MigrationStatus};
use crate::version::read_version;
use sw_db::{Database, DuckDbBackend};

/// A database connection whose schema has been brought up to date.
pub struct SchemaDb<D: Database = DuckDbBackend> {
    db: D,
    plan: Plan,
    outcome: MigrationOutcome,
}

impl SchemaDb<DuckDbBackend> {
    /// Open the DuckDB database named by `descriptor` (a file path or
    /// `":memory:"`) and migrate it to `schema`.
    ///
    /// Idempotent: safe to call on every process start.
    pub fn initialize<I, S>(descriptor: &str, schema: I, config: &MigrateConfig) -> MigrateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = DuckDbBackend::new(descriptor).map_err(MigrateError::Connection)?;
        Self::from_backend(backend, schema, config)
    }

    /// Like [`SchemaDb::initialize`], but panics if the database cannot be
    /// opened or migrated.
    pub fn must_initialize<I, S>(descriptor: &str, schema: I, config: &MigrateConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match Self::initialize(descriptor, schema, config) {
            Ok(db) => db,
            Err(e) => panic!("database initialization failed: {e}"),
        }
    }
}

impl<D: Database> SchemaDb<D> {
    /// Migrate an already-open backend to `schema`.
    pub fn from_backend<I, S>(db: D, schema: I, config: &MigrateConfig) -> MigrateResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let plan = Plan::new(schema);
        log::debug!(
            "Migrating {} database to version {}",
            db.db_type(),
            plan.desired_version()
        );
        let outcome = runner::run(&db, &plan, config)?;
        Ok(Self { db, plan, outcome })
    }

    /// Borrow the live backend for application queries.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Give up the handle and keep the backend.
    pub fn into_inner(self) -> D {
        self.db
    }

    /// The plan this handle was migrated to.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// What the migration performed when this handle was created.
    pub fn outcome(&self) -> MigrationOutcome {
        self.outcome
    }

    /// Stored schema version, read fresh from the database.
    pub fn version(&self) -> MigrateResult<usize> {
        Ok(read_version(&self.db)?.version())
    }

    /// Stored version against the plan, read fresh from the store.
    pub fn status(&self) -> MigrateResult<MigrationStatus> {
        runner::status(&self.db, &self.plan)
    }
}
