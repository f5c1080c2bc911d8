//! Status command implementation

use anyhow::{Context, Result};
use std::path::Path;
use sw_db::duckdb::MEMORY_DESCRIPTOR;
use sw_migrate::{status, DuckDbBackend, MigrationStatus, Plan};

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{load_project, ExitCode};

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let plan = Plan::new(project.statements.iter().cloned());

    let report = inspect(&project.descriptor, &plan)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", describe(&project.config.name, &report));
    }

    if args.check && (report.pending() > 0 || report.is_ahead()) {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// Report the store's version against `plan` without writing to it.
///
/// A database file that does not exist yet is reported as not initialized
/// and is never created; an existing one is opened read-only.
fn inspect(descriptor: &str, plan: &Plan) -> Result<MigrationStatus> {
    let backend = if descriptor.trim() == MEMORY_DESCRIPTOR {
        DuckDbBackend::in_memory()
    } else {
        let path = Path::new(descriptor);
        if !path.exists() {
            return Ok(MigrationStatus {
                current: 0,
                desired: plan.desired_version(),
                bootstrapped: false,
            });
        }
        DuckDbBackend::read_only(path)
    }
    .with_context(|| format!("Failed to open {descriptor}"))?;

    status(&backend, plan).context("Failed to read schema version")
}

fn describe(name: &str, report: &MigrationStatus) -> String {
    if !report.bootstrapped {
        format!(
            "{name}: not initialized ({} statement(s) pending)",
            report.desired
        )
    } else if report.is_ahead() {
        format!(
            "{name}: database at version {} is AHEAD of the plan ({} statements); this binary is older than the database",
            report.current, report.desired
        )
    } else if report.pending() == 0 {
        format!("{name}: up to date at version {}", report.current)
    } else {
        format!(
            "{name}: version {} of {} ({} statement(s) pending)",
            report.current,
            report.desired,
            report.pending()
        )
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
