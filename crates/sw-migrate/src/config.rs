//! Runner options.

use serde::{Deserialize, Serialize};

/// What to do when the version row exists but cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFailurePolicy {
    /// Propagate the error; never assume a fresh store.
    #[default]
    Strict,
    /// Treat any read failure as version 0 and re-run the plan from the
    /// start. Only safe when every statement is idempotent.
    AssumeFresh,
}

/// Options controlling a migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrateConfig {
    /// Compare stored statement checksums against the plan before applying
    #[serde(default = "default_true")]
    pub verify_checksums: bool,

    /// Handling of a version row that exists but fails to read
    #[serde(default)]
    pub on_read_failure: ReadFailurePolicy,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            verify_checksums: true,
            on_read_failure: ReadFailurePolicy::Strict,
        }
    }
}

fn default_true() -> bool {
    true
}
