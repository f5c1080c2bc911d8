//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fmt;
use sw_migrate::MigrateConfig;

use crate::cli::GlobalArgs;
use crate::config::ProjectConfig;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Everything a command needs to talk to the project's database.
#[derive(Debug)]
pub(crate) struct Project {
    pub config: ProjectConfig,
    pub descriptor: String,
    pub statements: Vec<String>,
}

impl Project {
    pub fn migrate_config(&self) -> &MigrateConfig {
        &self.config.migrate
    }
}

/// Load stepwise.yml and the schema files it lists.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = &global.project_dir;
    let config = ProjectConfig::load_from_dir(root).context("Failed to load project")?;
    let statements = config
        .load_statements(root)
        .context("Failed to load schema files")?;
    let descriptor = config.database_descriptor(root, global.database.as_deref());

    if global.verbose {
        eprintln!(
            "[verbose] Project '{}': {} schema statement(s), database {}",
            config.name,
            statements.len(),
            descriptor
        );
    }

    Ok(Project {
        config,
        descriptor,
        statements,
    })
}
