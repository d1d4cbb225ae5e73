use super::*;

fn count_rows(conn: &Connection) -> i64 {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {VERSION_TABLE}"),
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn test_fresh_database_is_not_version_controlled() {
    let conn = Connection::open_in_memory().unwrap();
    let store = VersionStore::new(&conn);
    assert!(!store.is_version_controlled().unwrap());
    assert_eq!(store.current_version().unwrap(), None);
}

#[test]
fn test_initialize() {
    let conn = Connection::open_in_memory().unwrap();
    let store = VersionStore::new(&conn);
    store.initialize().unwrap();

    assert!(store.is_version_controlled().unwrap());
    assert_eq!(store.current_version().unwrap(), Some(Version::zero()));
    assert_eq!(count_rows(&conn), 1);
}

#[test]
fn test_set_version() {
    let conn = Connection::open_in_memory().unwrap();
    let store = VersionStore::new(&conn);
    store.initialize().unwrap();

    let v = Version::from_stored("20091112130101");
    store.set_version(&v).unwrap();
    assert_eq!(store.current_version().unwrap(), Some(v));

    store.set_version(&Version::zero()).unwrap();
    assert_eq!(store.current_version().unwrap(), Some(Version::zero()));
    assert_eq!(count_rows(&conn), 1);
}

#[test]
fn test_empty_table_reads_as_zero() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("CREATE TABLE {VERSION_TABLE} (version TEXT)"))
        .unwrap();
    let store = VersionStore::new(&conn);

    assert_eq!(store.current_version().unwrap(), Some(Version::zero()));
}

#[test]
fn test_set_version_on_empty_table_inserts_row() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("CREATE TABLE {VERSION_TABLE} (version TEXT)"))
        .unwrap();
    let store = VersionStore::new(&conn);

    let v = Version::from_stored("20091112150200");
    store.set_version(&v).unwrap();
    assert_eq!(store.current_version().unwrap(), Some(v));
    assert_eq!(count_rows(&conn), 1);
}

#[test]
fn test_set_version_rolls_back_on_failure() {
    let conn = Connection::open_in_memory().unwrap();
    let store = VersionStore::new(&conn);
    store.initialize().unwrap();
    store
        .set_version(&Version::from_stored("20091112130101"))
        .unwrap();

    // Swap the table for one the update cannot satisfy.
    conn.execute_batch(&format!(
        "DROP TABLE {VERSION_TABLE}; \
         CREATE TABLE {VERSION_TABLE} (version TEXT CHECK (version <> '20091112150200')); \
         INSERT INTO {VERSION_TABLE} VALUES ('20091112130101');"
    ))
    .unwrap();

    let err = store
        .set_version(&Version::from_stored("20091112150200"))
        .unwrap_err();
    match err {
        CoreError::TransactionFailure { version, name, .. } => {
            assert_eq!(version, "20091112150200");
            assert_eq!(name, VERSION_TABLE);
        }
        other => panic!("expected TransactionFailure, got {other:?}"),
    }
    assert_eq!(
        store.current_version().unwrap().unwrap(),
        "20091112130101"
    );
}

#[test]
fn test_marker_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.duckdb");
    {
        let conn = Connection::open(&path).unwrap();
        let store = VersionStore::new(&conn);
        store.initialize().unwrap();
        store
            .set_version(&Version::from_stored("20091112150205"))
            .unwrap();
    }
    let conn = Connection::open(&path).unwrap();
    assert_eq!(
        VersionStore::new(&conn)
            .current_version()
            .unwrap()
            .unwrap(),
        "20091112150205"
    );
}
