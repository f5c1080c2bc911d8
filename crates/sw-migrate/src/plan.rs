//! The effective migration plan: bootstrap statements followed by the
//! application's schema history.

use sha2::{Digest, Sha256};

/// Name of the metadata table holding the version row.
pub const META_TABLE: &str = "_db_meta";

/// Statements that create and seed the metadata table.
///
/// Always plan indices 0 and 1. The seed value is `2` because these two
/// statements count as applied entries themselves.
pub const BOOTSTRAP: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS _db_meta (key VARCHAR PRIMARY KEY, val VARCHAR NOT NULL);",
    "INSERT INTO _db_meta (key,val) VALUES ('version', '2');",
];

/// Ordered statements to bring a store from nothing to the latest schema.
///
/// Entries are identified by position only, so an application must only
/// ever append to its statement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    statements: Vec<String>,
}

impl Plan {
    /// Build the plan for an application statement list.
    pub fn new<I, S>(schema: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let statements = BOOTSTRAP
            .iter()
            .map(|s| s.to_string())
            .chain(schema.into_iter().map(Into::into))
            .collect();
        Self { statements }
    }

    /// Version the store reaches once every statement is applied.
    pub fn desired_version(&self) -> usize {
        self.statements.len()
    }

    /// Statement at plan index `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.statements.get(index).map(String::as_str)
    }

    /// All statements, bootstrap first.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// The application part of the plan (without bootstrap).
    pub fn schema(&self) -> &[String] {
        &self.statements[BOOTSTRAP.len()..]
    }

    /// SHA-256 of the statement at `index`, hex encoded.
    pub fn checksum(&self, index: usize) -> Option<String> {
        self.get(index).map(compute_checksum)
    }
}

/// Compute SHA256 checksum of a statement
pub fn compute_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sql.as_bytes());
    format!("{:x}", hasher.finalize())
}
