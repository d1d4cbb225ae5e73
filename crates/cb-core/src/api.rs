//! Convenience entry points.
//!
//! The connection-based functions work on a caller-owned connection and never
//! close it. The `*_database` variants open a database by URL, operate, and
//! close it again.

use crate::engine::{MigrationReport, Migrator};
use crate::error::CoreResult;
use crate::source::MigrationSource;
use crate::version::Version;
use crate::version_store::VersionStore;
use cb_db::Database;
use duckdb::Connection;

pub use crate::source::load_migrations;

/// Upgrade `conn` with the migrations of `source`, to `target` or the latest.
pub fn upgrade<S>(conn: &Connection, source: &S, target: Option<&str>) -> CoreResult<MigrationReport>
where
    S: MigrationSource + ?Sized,
{
    let set = load_migrations(source)?;
    Migrator::new(conn).upgrade(&set, target)
}

/// Downgrade `conn` to `target` (`None` or `"0"` reverts everything).
pub fn downgrade<S>(conn: &Connection, source: &S, target: Option<&str>) -> CoreResult<MigrationReport>
where
    S: MigrationSource + ?Sized,
{
    let set = load_migrations(source)?;
    Migrator::new(conn).downgrade(&set, target)
}

/// The recorded version, or `None` when `conn` is not under version control.
pub fn current_version(conn: &Connection) -> CoreResult<Option<Version>> {
    VersionStore::new(conn).current_version()
}

/// Open the database at `url`, upgrade it, and close it.
///
/// Migrations are loaded before the database is opened, so a broken migration
/// never creates a database file.
pub fn upgrade_database<S>(url: &str, source: &S, target: Option<&str>) -> CoreResult<MigrationReport>
where
    S: MigrationSource + ?Sized,
{
    let set = load_migrations(source)?;
    with_database(url, |conn| {
        Migrator::new(conn)
            .with_database_name(url)
            .upgrade(&set, target)
    })
}

/// Open the database at `url`, downgrade it, and close it.
pub fn downgrade_database<S>(url: &str, source: &S, target: Option<&str>) -> CoreResult<MigrationReport>
where
    S: MigrationSource + ?Sized,
{
    let set = load_migrations(source)?;
    with_database(url, |conn| {
        Migrator::new(conn)
            .with_database_name(url)
            .downgrade(&set, target)
    })
}

/// Open the database at `url` and read its version.
pub fn database_version(url: &str) -> CoreResult<Option<Version>> {
    with_database(url, current_version)
}

fn with_database<T, F>(url: &str, body: F) -> CoreResult<T>
where
    F: FnOnce(&Connection) -> CoreResult<T>,
{
    let db = Database::open(url)?;
    // On error, dropping `db` closes the connection and the operation's error wins.
    let value = body(db.conn())?;
    db.close()?;
    Ok(value)
}
