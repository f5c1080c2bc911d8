use super::*;

#[test]
fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[test]
fn test_new_memory_descriptor() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    assert_eq!(db.query_i64("SELECT 0").unwrap(), 0);
}

#[test]
fn test_new_rejects_empty_descriptor() {
    assert!(matches!(
        DuckDbBackend::new("  "),
        Err(DbError::ConnectionError(_))
    ));
}

#[test]
fn test_from_path_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.duckdb");
    let db = DuckDbBackend::from_path(&path).unwrap();
    db.execute_batch("CREATE TABLE t (id INTEGER)").unwrap();
    assert!(path.exists());
}

#[test]
fn test_query_text_no_rows_is_not_found() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE kv (k VARCHAR, v VARCHAR)")
        .unwrap();

    let err = db
        .query_text("SELECT v FROM kv WHERE k = ?", &["missing"])
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_execute_with_params() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE kv (k VARCHAR PRIMARY KEY, v VARCHAR)")
        .unwrap();

    let inserted = db
        .execute("INSERT INTO kv (k, v) VALUES (?, ?)", &["a", "1"])
        .unwrap();
    assert_eq!(inserted, 1);

    let updated = db
        .execute("UPDATE kv SET v = ? WHERE k = ?", &["2", "a"])
        .unwrap();
    assert_eq!(updated, 1);
    assert_eq!(
        db.query_text("SELECT v FROM kv WHERE k = ?", &["a"]).unwrap(),
        "2"
    );
}

#[test]
fn test_query_pairs() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE kv (k VARCHAR, v VARCHAR);
         INSERT INTO kv VALUES ('a', '1'), ('b', '2'), ('c', '3');",
    )
    .unwrap();

    let rows = db
        .query_pairs("SELECT k, v FROM kv WHERE k <> ? ORDER BY k", &["b"])
        .unwrap();
    assert_eq!(
        rows,
        vec![
            ("a".to_string(), "1".to_string()),
            ("c".to_string(), "3".to_string())
        ]
    );
}

#[test]
fn test_relation_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("things").unwrap());

    db.execute_batch("CREATE TABLE things (id INTEGER)").unwrap();
    assert!(db.relation_exists("things").unwrap());
    assert!(db.relation_exists("main.things").unwrap());
}

#[test]
fn test_rollback_discards_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute_batch("CREATE TABLE scratch (id INTEGER)").unwrap();
    db.rollback().unwrap();

    assert!(!db.relation_exists("scratch").unwrap());
}

#[test]
fn test_commit_persists_ddl() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute_batch("CREATE TABLE kept (id INTEGER)").unwrap();
    db.commit().unwrap();

    assert!(db.relation_exists("kept").unwrap());
}

#[test]
fn test_commit_without_transaction_fails() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(matches!(db.commit(), Err(DbError::TransactionError(_))));
}

#[test]
fn test_read_only_missing_file_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.duckdb");

    assert!(matches!(
        DuckDbBackend::read_only(&path),
        Err(DbError::ConnectionError(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_read_only_rejects_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.duckdb");
    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE t (id INTEGER)").unwrap();
    }

    let db = DuckDbBackend::read_only(&path).unwrap();
    assert!(db.relation_exists("t").unwrap());
    assert!(db.execute_batch("INSERT INTO t VALUES (1)").is_err());
}
