//! Tests for reading and advancing the stored schema version.

use super::*;
use crate::plan::BOOTSTRAP;
use sw_db::DuckDbBackend;

// ── Helpers ────────────────────────────────────────────────────────────

fn bootstrapped() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(BOOTSTRAP[0]).unwrap();
    db.execute_batch(BOOTSTRAP[1]).unwrap();
    db
}

// ── read_version ───────────────────────────────────────────────────────

#[test]
fn missing_table_is_not_bootstrapped() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(read_version(&db).unwrap(), VersionRead::NotBootstrapped);
    assert_eq!(read_version(&db).unwrap().version(), 0);
}

#[test]
fn missing_row_is_not_bootstrapped() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(BOOTSTRAP[0]).unwrap();
    assert_eq!(read_version(&db).unwrap(), VersionRead::NotBootstrapped);
}

#[test]
fn seeded_row_reads_two() {
    let db = bootstrapped();
    assert_eq!(read_version(&db).unwrap(), VersionRead::Version(2));
}

#[test]
fn non_numeric_value_is_corrupt() {
    let db = bootstrapped();
    db.execute_batch("UPDATE _db_meta SET val = 'two' WHERE key = 'version'")
        .unwrap();

    let err = read_version(&db).unwrap_err();
    assert!(matches!(err, MigrateError::CorruptVersion { ref value } if value == "two"));
}

#[test]
fn negative_value_is_corrupt() {
    let db = bootstrapped();
    db.execute_batch("UPDATE _db_meta SET val = '-1' WHERE key = 'version'")
        .unwrap();
    assert!(matches!(
        read_version(&db),
        Err(MigrateError::CorruptVersion { .. })
    ));
}

#[test]
fn parse_version_trims_whitespace() {
    assert_eq!(parse_version(" 12 ").unwrap(), 12);
    assert!(parse_version("").is_err());
}

// ── advance_version ────────────────────────────────────────────────────

#[test]
fn advance_updates_row() {
    let db = bootstrapped();
    advance_version(&db, 3).unwrap();
    assert_eq!(read_version(&db).unwrap(), VersionRead::Version(3));
}

#[test]
fn advance_before_seed_touches_nothing() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(BOOTSTRAP[0]).unwrap();

    advance_version(&db, 1).unwrap();
    assert_eq!(read_version(&db).unwrap(), VersionRead::NotBootstrapped);
}

#[test]
fn only_one_version_row_exists() {
    let db = bootstrapped();
    advance_version(&db, 5).unwrap();
    advance_version(&db, 6).unwrap();
    assert_eq!(
        db.query_i64("SELECT COUNT(*) FROM _db_meta WHERE key = 'version'")
            .unwrap(),
        1
    );
}

// ── checksum ledger ────────────────────────────────────────────────────

#[test]
fn checksums_round_trip_sorted() {
    let db = bootstrapped();
    record_checksum(&db, 10, "bbb").unwrap();
    record_checksum(&db, 2, "aaa").unwrap();

    assert_eq!(
        stored_checksums(&db).unwrap(),
        vec![(2, "aaa".to_string()), (10, "bbb".to_string())]
    );
}

#[test]
fn record_checksum_replaces_existing() {
    let db = bootstrapped();
    record_checksum(&db, 2, "old").unwrap();
    record_checksum(&db, 2, "new").unwrap();
    assert_eq!(stored_checksums(&db).unwrap(), vec![(2, "new".to_string())]);
}

#[test]
fn malformed_checksum_keys_are_ignored() {
    let db = bootstrapped();
    db.execute_batch("INSERT INTO _db_meta (key, val) VALUES ('checksum.x', 'zzz')")
        .unwrap();
    record_checksum(&db, 3, "ccc").unwrap();
    assert_eq!(stored_checksums(&db).unwrap(), vec![(3, "ccc".to_string())]);
}
