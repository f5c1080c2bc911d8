//! Migrate command implementation

use anyhow::{Context, Result};
use sw_migrate::SchemaDb;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::load_project;

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let mut config = project.migrate_config().clone();
    if args.no_verify {
        config.verify_checksums = false;
    }

    let db = SchemaDb::initialize(&project.descriptor, project.statements.iter().cloned(), &config)
        .with_context(|| format!("Migration of {} failed", project.descriptor))?;

    let outcome = db.outcome();
    if outcome.is_noop() {
        println!(
            "Database '{}' is up to date at version {}",
            project.config.name, outcome.to
        );
    } else {
        println!(
            "Migrated '{}' from version {} to {} ({} statement{} applied)",
            project.config.name,
            outcome.from,
            outcome.to,
            outcome.applied(),
            if outcome.applied() == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
