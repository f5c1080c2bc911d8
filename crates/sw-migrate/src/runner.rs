//! Migration runner.
//!
//! A run probes the connection, reads the stored version `N`, and applies
//! plan entries `N..len` in ascending order. Each entry is executed in its
//! own transaction together with the version update to `index + 1`, so a
//! failure leaves the store at exactly the failing index and the next run
//! resumes there.

use crate::config::{MigrateConfig, ReadFailurePolicy};
use crate::error::{MigrateError, MigrateResult};
use crate::plan::{compute_checksum, Plan};
use crate::version::{
    advance_version, read_version, record_checksum, stored_checksums, VersionRead,
};
use serde::Serialize;
use sw_db::{Database, DbError, DbResult};

/// Trivial query that forces a round-trip before any real work.
const LIVENESS_PROBE: &str = "SELECT 0";

/// Version span covered by a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MigrationOutcome {
    /// Version found before the run
    pub from: usize,
    /// Version after the run (always the plan length)
    pub to: usize,
}

impl MigrationOutcome {
    /// Number of statements applied by the run.
    pub fn applied(&self) -> usize {
        self.to - self.from
    }

    /// True when the store was already up to date.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Read-only view of where a store stands against a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    /// Applied plan entries
    pub current: usize,
    /// Plan length
    pub desired: usize,
    /// Whether the metadata table and version row exist
    pub bootstrapped: bool,
}

impl MigrationStatus {
    /// Statements a run would apply.
    pub fn pending(&self) -> usize {
        self.desired.saturating_sub(self.current)
    }

    /// True when the store holds more entries than the plan.
    pub fn is_ahead(&self) -> bool {
        self.current > self.desired
    }
}

/// Bring `db` up to the end of `plan`.
///
/// Stops at the first failing statement; nothing after it is attempted and
/// the store stays at that statement's index.
pub fn run<D: Database + ?Sized>(
    db: &D,
    plan: &Plan,
    config: &MigrateConfig,
) -> MigrateResult<MigrationOutcome> {
    probe(db)?;

    let current = current_version(db, config)?;
    let desired = plan.desired_version();

    if current > desired {
        return Err(MigrateError::Downgrade {
            stored: current,
            desired,
        });
    }

    if config.verify_checksums && current > 0 {
        verify_checksums(db, plan, current)?;
    }

    if current == desired {
        log::debug!("Database schema is up to date at version {current}");
        return Ok(MigrationOutcome {
            from: current,
            to: desired,
        });
    }

    if current == 0 {
        log::info!("Creating database");
    } else {
        log::info!("Performing database migration from {current} -> {desired}");
    }

    for (index, sql) in plan.statements().iter().enumerate().skip(current) {
        apply_statement(db, index, sql)?;
    }

    Ok(MigrationOutcome {
        from: current,
        to: desired,
    })
}

/// Report the stored version against `plan` without changing anything.
pub fn status<D: Database + ?Sized>(db: &D, plan: &Plan) -> MigrateResult<MigrationStatus> {
    probe(db)?;
    let read = read_version(db)?;
    Ok(MigrationStatus {
        current: read.version(),
        desired: plan.desired_version(),
        bootstrapped: matches!(read, VersionRead::Version(_)),
    })
}

fn probe<D: Database + ?Sized>(db: &D) -> MigrateResult<()> {
    let value = db.query_i64(LIVENESS_PROBE).map_err(MigrateError::Connection)?;
    if value != 0 {
        return Err(MigrateError::Connection(DbError::Internal(format!(
            "liveness probe returned {value}, expected 0"
        ))));
    }
    Ok(())
}

fn current_version<D: Database + ?Sized>(db: &D, config: &MigrateConfig) -> MigrateResult<usize> {
    match read_version(db) {
        Ok(read) => Ok(read.version()),
        Err(err @ (MigrateError::VersionRead(_) | MigrateError::CorruptVersion { .. }))
            if config.on_read_failure == ReadFailurePolicy::AssumeFresh =>
        {
            log::warn!("{err}; assuming a fresh database");
            Ok(0)
        }
        Err(err) => Err(err),
    }
}

fn verify_checksums<D: Database + ?Sized>(
    db: &D,
    plan: &Plan,
    current: usize,
) -> MigrateResult<()> {
    for (index, stored) in stored_checksums(db)? {
        if index >= current {
            continue;
        }
        let Some(planned) = plan.checksum(index) else {
            continue;
        };
        if planned != stored {
            return Err(MigrateError::ChecksumMismatch {
                index,
                stored,
                planned,
            });
        }
    }
    Ok(())
}

fn apply_statement<D: Database + ?Sized>(db: &D, index: usize, sql: &str) -> MigrateResult<()> {
    db.begin()?;

    log::debug!("{sql}");
    if let Err(source) = db.execute_batch(sql) {
        rollback_quietly(db, index);
        return Err(MigrateError::Statement { index, source });
    }

    if let Err(source) = record_applied(db, index, sql) {
        rollback_quietly(db, index);
        return Err(MigrateError::VersionUpdate { index, source });
    }

    if let Err(source) = db.commit() {
        rollback_quietly(db, index);
        return Err(MigrateError::Commit { index, source });
    }

    Ok(())
}

fn record_applied<D: Database + ?Sized>(db: &D, index: usize, sql: &str) -> DbResult<()> {
    advance_version(db, index + 1)?;
    record_checksum(db, index, &compute_checksum(sql))
}

fn rollback_quietly<D: Database + ?Sized>(db: &D, index: usize) {
    if let Err(e) = db.rollback() {
        log::warn!("Rollback of migration statement {index} failed: {e}");
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
