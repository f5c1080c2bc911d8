use super::*;
use std::fs;
use std::path::Path;
use sw_db::{Database, DuckDbBackend};
use tempfile::tempdir;

fn write_project(root: &Path, schema: &[(&str, &str)]) {
    let mut config = String::from("name: test_project\ndatabase: app.duckdb\nschema:\n");
    for (file, sql) in schema {
        fs::write(root.join(file), sql).unwrap();
        config.push_str(&format!("  - {file}\n"));
    }
    fs::write(root.join("stepwise.yml"), config).unwrap();
}

fn global_for(root: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: root.to_path_buf(),
        database: None,
    }
}

fn stored_version(root: &Path) -> String {
    let db = DuckDbBackend::from_path(&root.join("app.duckdb")).unwrap();
    db.query_text("SELECT val FROM _db_meta WHERE key = 'version'", &[])
        .unwrap()
}

#[test]
fn test_migrate_creates_database() {
    let dir = tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            ("001_users.sql", "CREATE TABLE users (id INTEGER);"),
            ("002_posts.sql", "CREATE TABLE posts (id INTEGER, author INTEGER);"),
        ],
    );

    execute(&MigrateArgs { no_verify: false }, &global_for(dir.path())).unwrap();

    assert_eq!(stored_version(dir.path()), "4");
}

#[test]
fn test_migrate_picks_up_appended_file() {
    let dir = tempdir().unwrap();
    let first = ("001_users.sql", "CREATE TABLE users (id INTEGER);");
    write_project(dir.path(), &[first]);
    execute(&MigrateArgs { no_verify: false }, &global_for(dir.path())).unwrap();

    write_project(
        dir.path(),
        &[first, ("002_email.sql", "ALTER TABLE users ADD COLUMN email VARCHAR;")],
    );
    execute(&MigrateArgs { no_verify: false }, &global_for(dir.path())).unwrap();

    assert_eq!(stored_version(dir.path()), "4");
}

#[test]
fn test_migrate_reports_failing_statement() {
    let dir = tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            ("001_users.sql", "CREATE TABLE users (id INTEGER);"),
            ("002_broken.sql", "CREATE TABLE broken ("),
        ],
    );

    let err = execute(&MigrateArgs { no_verify: false }, &global_for(dir.path())).unwrap_err();

    let migrate_err = err.downcast_ref::<sw_migrate::MigrateError>().unwrap();
    assert_eq!(migrate_err.failed_index(), Some(3));
    assert_eq!(stored_version(dir.path()), "3");
}

#[test]
fn test_no_verify_skips_checksum_check() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), &[("001_users.sql", "CREATE TABLE users (id INTEGER);")]);
    execute(&MigrateArgs { no_verify: false }, &global_for(dir.path())).unwrap();

    // edit a released statement in place
    write_project(dir.path(), &[("001_users.sql", "CREATE TABLE users (id BIGINT);")]);

    assert!(execute(&MigrateArgs { no_verify: false }, &global_for(dir.path())).is_err());
    execute(&MigrateArgs { no_verify: true }, &global_for(dir.path())).unwrap();
}

#[test]
fn test_migrate_without_config_fails() {
    let dir = tempdir().unwrap();
    let err = execute(&MigrateArgs { no_verify: false }, &global_for(dir.path())).unwrap_err();
    assert!(err.to_string().contains("Failed to load project"));
}
