use super::*;
use cb_core::{CodeMigrations, MigrationCode};
use std::fs;
use tempfile::tempdir;

fn unit(name: &str) -> MigrationCode {
    MigrationCode::new(name)
        .upgrade(|_| Ok(()))
        .downgrade(|_| Ok(()))
}

fn set() -> MigrationSet {
    let source = CodeMigrations::new(vec![
        unit("20091112150200_scores"),
        unit("20091112130101_games"),
        unit("20091112150205_jams"),
    ]);
    load_migrations(&source).unwrap()
}

#[test]
fn test_rows_are_ascending() {
    let rows = build_rows(&set(), None);
    let versions: Vec<_> = rows.iter().map(|r| r.version.as_str()).collect();
    assert_eq!(
        versions,
        vec!["20091112130101", "20091112150200", "20091112150205"]
    );
    assert!(rows.iter().all(|r| r.applied.is_none()));
}

#[test]
fn test_rows_mark_applied() {
    let current = Version::from_stored("20091112150200");
    let rows = build_rows(&set(), Some(&current));
    let applied: Vec<_> = rows.iter().map(|r| r.applied).collect();
    assert_eq!(applied, vec![Some(true), Some(true), Some(false)]);
}

#[test]
fn test_zero_marks_nothing_applied() {
    let rows = build_rows(&set(), Some(&Version::zero()));
    assert!(rows.iter().all(|r| r.applied == Some(false)));
}

#[test]
fn test_json_skips_unknown_applied() {
    let rows = build_rows(&set(), None);
    let json = serde_json::to_value(&rows).unwrap();
    assert!(json[0].get("applied").is_none());
    assert_eq!(json[0]["name"], "games");
}

#[test]
fn test_missing_database_file_is_not_created() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("never.duckdb");
    let url = db.display().to_string();

    assert!(applied_version(&url).unwrap().is_none());
    assert!(!db.exists());
}

#[test]
fn test_execute_against_migrated_database() {
    let dir = tempdir().unwrap();
    let migrations = dir.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    fs::write(
        migrations.join("20091112130101_games.sql"),
        "-- upgrade\nCREATE TABLE games (id INTEGER);\n-- downgrade\nDROP TABLE games;\n",
    )
    .unwrap();
    let url = dir.path().join("app.duckdb").display().to_string();
    cb_core::upgrade_database(&url, &cb_core::SqlDirectory::new(&migrations), None).unwrap();

    let global = GlobalArgs {
        verbose: false,
        project_dir: dir.path().to_path_buf(),
        config: None,
        database: Some(url),
        migration_dir: None,
    };
    let args = ListArgs {
        output: ListOutput::Json,
    };
    execute(&args, &global).unwrap();
}
