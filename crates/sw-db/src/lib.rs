//! sw-db - Database abstraction layer for Stepwise
//!
//! This crate provides the `Database` trait the migration engine drives,
//! a DuckDB implementation, and the transaction helper shared by callers.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod transaction;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use transaction::with_transaction;
