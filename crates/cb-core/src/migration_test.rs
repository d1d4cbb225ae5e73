use super::*;

fn noop(_: &Connection) -> Result<(), ActionError> {
    Ok(())
}

fn complete(name: &str) -> MigrationCode {
    MigrationCode::new(name).upgrade(noop).downgrade(noop)
}

fn invalid_reason(err: CoreError) -> String {
    match err {
        CoreError::InvalidMigration { reason, .. } => reason,
        other => panic!("expected InvalidMigration, got {other:?}"),
    }
}

#[test]
fn test_from_identity() {
    let m = Migration::from_identity("20091112150200__migration_two", complete("ignored")).unwrap();
    assert_eq!(m.version(), "20091112150200");
    assert_eq!(m.name(), "migration_two");
    assert!(m.path().is_none());
}

#[test]
fn test_from_identity_invalid_name() {
    let err = Migration::from_identity("migration_two", complete("x")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifier { ref identity } if identity == "migration_two"));
    assert!(err.is_load_error());
}

#[test]
fn test_identity_checked_before_actions() {
    let err = Migration::from_identity("bad", MigrationCode::new("bad")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifier { .. }));
}

#[test]
fn test_missing_upgrade() {
    let code = MigrationCode::new("m").downgrade(noop);
    let err = Migration::from_identity("20091112150200_missing_upgrade", code).unwrap_err();
    assert_eq!(invalid_reason(err), "missing required actions: upgrade");
}

#[test]
fn test_missing_downgrade() {
    let code = MigrationCode::new("m").upgrade(noop);
    let err = Migration::from_identity("20091112150205_missing_downgrade", code).unwrap_err();
    assert_eq!(invalid_reason(err), "missing required actions: downgrade");
}

#[test]
fn test_missing_both_actions() {
    let err = Migration::from_code(MigrationCode::new("v20091112150205_empty")).unwrap_err();
    assert_eq!(
        invalid_reason(err),
        "missing required actions: upgrade, downgrade"
    );
}

#[test]
fn test_from_code_uses_declared_name() {
    let m = Migration::from_code(complete("examples.migrations.v20260206024658_create_users"))
        .unwrap();
    assert_eq!(m.version(), "20260206024658");
    assert_eq!(m.name(), "create_users");
}

#[test]
fn test_from_code_falls_back_to_declared_version() {
    let m = Migration::from_code(complete("app::migrations::create_users").version("v20260206024658"))
        .unwrap();
    assert_eq!(m.version(), "20260206024658");
    assert_eq!(m.name(), "create_users");
}

#[test]
fn test_from_code_name_wins_over_declared_version() {
    let m = Migration::from_code(complete("20260206024658_users").version("20990101000000")).unwrap();
    assert_eq!(m.version(), "20260206024658");
}

#[test]
fn test_from_code_without_any_version() {
    let err = Migration::from_code(complete("create_users")).unwrap_err();
    assert_eq!(invalid_reason(err), "no version could be determined");
}

#[test]
fn test_from_code_with_malformed_declared_version() {
    let err = Migration::from_code(complete("create_users").version("2026")).unwrap_err();
    assert_eq!(invalid_reason(err), "no version could be determined");
}

#[test]
fn test_actions_are_invoked() {
    let conn = Connection::open_in_memory().unwrap();
    let code = MigrationCode::new("20091112130101_t")
        .upgrade(|c| {
            c.execute_batch("CREATE TABLE t (id INTEGER)")?;
            Ok(())
        })
        .downgrade(|c| {
            c.execute_batch("DROP TABLE t")?;
            Ok(())
        });
    let m = Migration::from_code(code).unwrap();

    m.upgrade(&conn).unwrap();
    assert!(cb_db::relation_exists(&conn, "t").unwrap());
    m.downgrade(&conn).unwrap();
    assert!(!cb_db::relation_exists(&conn, "t").unwrap());
}

#[test]
fn test_action_errors_propagate_unwrapped() {
    let conn = Connection::open_in_memory().unwrap();
    let code = MigrationCode::new("20091112130101_fails")
        .upgrade(|_| Err("upgrade exploded".into()))
        .downgrade(noop);
    let m = Migration::from_code(code).unwrap();

    let err = m.upgrade(&conn).unwrap_err();
    assert_eq!(err.to_string(), "upgrade exploded");
}

#[test]
fn test_with_path() {
    let m = Migration::from_identity("20091112130101_a", complete("a"))
        .unwrap()
        .with_path("migrations/20091112130101_a.sql");
    assert_eq!(
        m.path().unwrap(),
        Path::new("migrations/20091112130101_a.sql")
    );
}

#[test]
fn test_debug_omits_actions() {
    let m = Migration::from_identity("20091112130101_a", complete("a")).unwrap();
    let debug = format!("{m:?}");
    assert!(debug.contains("20091112130101"));
    assert!(debug.contains("\"a\""));
}

#[test]
fn test_from_file_keeps_dots_and_path() {
    let path = PathBuf::from("migrations/20091112130101_add_v1.2_column.sql");
    let m = Migration::from_file(&path, complete("ignored")).unwrap();
    assert_eq!(m.version(), "20091112130101");
    assert_eq!(m.name(), "add_v1.2_column");
    assert_eq!(m.path(), Some(path.as_path()));
}

#[test]
fn test_from_file_errors_name_the_file() {
    let err = Migration::from_file("migrations/add.v1.sql", complete("x")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidIdentifier { ref identity } if identity.ends_with("add.v1.sql")));

    let code = MigrationCode::new("x").upgrade(noop);
    let err = Migration::from_file("migrations/20091112130101_one_way.sql", code).unwrap_err();
    match err {
        CoreError::InvalidMigration { migration, .. } => {
            assert!(migration.ends_with("20091112130101_one_way.sql"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
