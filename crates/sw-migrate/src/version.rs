//! Version store backed by the `_db_meta` table.
//!
//! The table itself is created by plan entries 0 and 1, so there is no
//! separate bootstrap path here: this module only reads and advances the
//! counter, and keeps the per-statement checksum ledger next to it.

use crate::error::{MigrateError, MigrateResult};
use crate::plan::META_TABLE;
use sw_db::{Database, DbError, DbResult};

const SELECT_VERSION: &str = "SELECT val FROM _db_meta WHERE key = 'version'";
const UPDATE_VERSION: &str = "UPDATE _db_meta SET val = ? WHERE key = 'version'";
const UPSERT_CHECKSUM: &str = "INSERT OR REPLACE INTO _db_meta (key, val) VALUES (?, ?)";
const SELECT_CHECKSUMS: &str = "SELECT key, val FROM _db_meta WHERE key LIKE 'checksum.%'";

const CHECKSUM_PREFIX: &str = "checksum.";

/// Outcome of reading the version row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRead {
    /// The row exists and holds this many applied plan entries.
    Version(usize),
    /// The metadata table or its version row is absent: a fresh store.
    NotBootstrapped,
}

impl VersionRead {
    /// Number of applied plan entries (0 for a fresh store).
    pub fn version(self) -> usize {
        match self {
            VersionRead::Version(v) => v,
            VersionRead::NotBootstrapped => 0,
        }
    }
}

/// Read the current schema version.
///
/// Absence of the table or the row is reported as
/// [`VersionRead::NotBootstrapped`]; every other failure is an error.
pub fn read_version<D: Database + ?Sized>(db: &D) -> MigrateResult<VersionRead> {
    let exists = db
        .relation_exists(META_TABLE)
        .map_err(MigrateError::VersionRead)?;
    if !exists {
        return Ok(VersionRead::NotBootstrapped);
    }

    match db.query_text(SELECT_VERSION, &[]) {
        Ok(raw) => parse_version(&raw).map(VersionRead::Version),
        Err(DbError::NotFound) => Ok(VersionRead::NotBootstrapped),
        Err(e) => Err(MigrateError::VersionRead(e)),
    }
}

/// Set the version row. Must run inside the transaction of the statement
/// it accounts for.
///
/// While plan entry 0 is applied the row does not exist yet, so touching
/// zero rows is not an error.
pub fn advance_version<D: Database + ?Sized>(db: &D, new_value: usize) -> DbResult<()> {
    let value = new_value.to_string();
    db.execute(UPDATE_VERSION, &[value.as_str()])?;
    Ok(())
}

/// Store the checksum of the statement applied at plan index `index`.
pub fn record_checksum<D: Database + ?Sized>(
    db: &D,
    index: usize,
    checksum: &str,
) -> DbResult<()> {
    let key = checksum_key(index);
    db.execute(UPSERT_CHECKSUM, &[key.as_str(), checksum])?;
    Ok(())
}

/// All recorded statement checksums as `(plan index, checksum)`, ascending.
pub fn stored_checksums<D: Database + ?Sized>(db: &D) -> DbResult<Vec<(usize, String)>> {
    let mut sums: Vec<(usize, String)> = db
        .query_pairs(SELECT_CHECKSUMS, &[])?
        .into_iter()
        .filter_map(|(key, val)| {
            let index = key.strip_prefix(CHECKSUM_PREFIX)?.parse::<usize>().ok();
            if index.is_none() {
                log::warn!("Ignoring malformed checksum key '{key}' in {META_TABLE}");
            }
            index.map(|i| (i, val))
        })
        .collect();
    sums.sort_by_key(|(index, _)| *index);
    Ok(sums)
}

fn checksum_key(index: usize) -> String {
    format!("{CHECKSUM_PREFIX}{index}")
}

pub(crate) fn parse_version(raw: &str) -> MigrateResult<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| MigrateError::CorruptVersion {
            value: raw.to_string(),
        })
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
