//! BEGIN / COMMIT / ROLLBACK wrapper for application writes.

use crate::error::DbError;
use crate::traits::Database;

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
///
/// A failed `COMMIT` triggers a best-effort `ROLLBACK`; the commit error is
/// the one returned.
pub fn with_transaction<D, T, E, F>(db: &D, body: F) -> Result<T, E>
where
    D: Database + ?Sized,
    E: From<DbError>,
    F: FnOnce(&D) -> Result<T, E>,
{
    db.begin()?;

    match body(db) {
        Ok(value) => {
            if let Err(commit_err) = db.commit() {
                if let Err(rollback_err) = db.rollback() {
                    log::debug!("ROLLBACK after failed COMMIT also failed: {rollback_err}");
                }
                return Err(commit_err.into());
            }
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = db.rollback() {
                log::warn!("ROLLBACK failed: {rollback_err}");
            }
            Err(err)
        }
    }
}
