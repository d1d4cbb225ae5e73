//! The persisted version marker.
//!
//! A database is under version control when the single-row
//! `migration_version` table exists. The row holds `"0"` until the first
//! migration is applied, then the version of the most recent applied one.

use crate::error::{CoreError, CoreResult};
use crate::version::Version;
use cb_db::with_transaction;
use duckdb::Connection;

/// Name of the table holding the version marker.
pub const VERSION_TABLE: &str = "migration_version";

/// Reads and writes the version marker on a borrowed connection.
#[derive(Clone, Copy)]
pub struct VersionStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> VersionStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// True iff the version table exists.
    pub fn is_version_controlled(&self) -> CoreResult<bool> {
        Ok(cb_db::relation_exists(self.conn, VERSION_TABLE)?)
    }

    /// Create the version table holding `"0"`, in one transaction.
    ///
    /// Callers check [`is_version_controlled`](Self::is_version_controlled)
    /// first; initializing twice would insert a second row.
    pub fn initialize(&self) -> CoreResult<()> {
        log::debug!("Initializing version control ({VERSION_TABLE})");
        with_transaction(self.conn, |conn| -> CoreResult<()> {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {VERSION_TABLE} (version TEXT)"
            ))?;
            conn.execute(
                &format!("INSERT INTO {VERSION_TABLE} VALUES (?)"),
                duckdb::params![Version::zero().as_str()],
            )?;
            Ok(())
        })
    }

    /// The recorded version, or `None` when the database is not under version
    /// control. An empty table reads as `"0"`.
    pub fn current_version(&self) -> CoreResult<Option<Version>> {
        if !self.is_version_controlled()? {
            return Ok(None);
        }
        read_version(self.conn).map(Some)
    }

    /// Record `version` in its own transaction.
    ///
    /// A failed write is rolled back and reported as
    /// [`CoreError::TransactionFailure`] naming the version table.
    pub fn set_version(&self, version: &Version) -> CoreResult<()> {
        with_transaction(self.conn, |conn| write_version(conn, version)).map_err(|err| {
            CoreError::TransactionFailure {
                version: version.to_string(),
                name: VERSION_TABLE.to_string(),
                source: Box::new(err),
            }
        })
    }
}

/// Read the marker from an existing version table.
pub(crate) fn read_version(conn: &Connection) -> CoreResult<Version> {
    let stored = conn.query_row(
        &format!("SELECT version FROM {VERSION_TABLE} LIMIT 1"),
        [],
        |row| row.get::<_, Option<String>>(0),
    );
    match stored {
        Ok(value) => Ok(Version::from_stored(value.unwrap_or_default())),
        Err(duckdb::Error::QueryReturnedNoRows) => {
            log::warn!("{VERSION_TABLE} is empty; treating the database as version 0");
            Ok(Version::zero())
        }
        Err(e) => Err(e.into()),
    }
}

/// Update the marker row. Runs inside the caller's transaction.
pub(crate) fn write_version(conn: &Connection, version: &Version) -> CoreResult<()> {
    let updated = conn.execute(
        &format!("UPDATE {VERSION_TABLE} SET version = ?"),
        duckdb::params![version.as_str()],
    )?;
    if updated == 0 {
        conn.execute(
            &format!("INSERT INTO {VERSION_TABLE} VALUES (?)"),
            duckdb::params![version.as_str()],
        )?;
    }
    log::debug!("Recorded database version {version}");
    Ok(())
}

#[cfg(test)]
#[path = "version_store_test.rs"]
mod tests;
