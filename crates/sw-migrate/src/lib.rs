//! Sequential schema migrations for Stepwise.
//!
//! An application supplies an append-only list of SQL statements; the
//! engine prefixes two bootstrap statements that create and seed the
//! `_db_meta` version table, then applies every statement the store has not
//! seen yet, one transaction per statement. The stored version is the
//! number of plan entries committed so far, so an interrupted run resumes
//! from the exact failing index.

pub mod config;
pub mod error;
pub mod plan;
pub mod runner;
pub mod schema_db;
pub mod test_utils;
pub mod version;

pub use config::{MigrateConfig, ReadFailurePolicy};
pub use error::{MigrateError, MigrateResult};
pub use plan::Plan;
pub use runner::{run, status, MigrationOutcome, MigrationStatus};
pub use schema_db::SchemaDb;
pub use sw_db::{Database, DbError, DuckDbBackend};
pub use version::VersionRead;
