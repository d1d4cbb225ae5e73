//! DuckDB database handle

use crate::error::{DbError, DbResult};
use duckdb::Connection;
use std::fmt;
use std::path::Path;

/// URL that opens a private in-memory database instead of a file.
pub const MEMORY_URL: &str = ":memory:";

/// An open embedded database.
///
/// Owns the DuckDB [`Connection`]. Migration code only ever borrows the
/// connection through [`Database::conn`]; closing is the owner's job.
pub struct Database {
    url: String,
    conn: Connection,
}

impl Database {
    /// Create a new in-memory DuckDB database
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            url: MEMORY_URL.to_string(),
            conn,
        })
    }

    /// Open (or create) a DuckDB database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            url: path.display().to_string(),
            conn,
        })
    }

    /// Open from a URL string (handles the `:memory:` special case)
    pub fn open(url: &str) -> DbResult<Self> {
        log::debug!("Opening database {url}");
        if url == MEMORY_URL {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(url))
        }
    }

    /// The URL this database was opened from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute one or more SQL statements.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Check if a table or view exists.
    pub fn relation_exists(&self, name: &str) -> DbResult<bool> {
        relation_exists(&self.conn, name)
    }

    /// Close the connection, surfacing any error the driver reports.
    ///
    /// Dropping a `Database` also closes it, silently.
    pub fn close(self) -> DbResult<()> {
        let url = self.url;
        self.conn
            .close()
            .map_err(|(_, e)| DbError::CloseError(format!("{e}: {url}")))
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database").field("url", &self.url).finish()
    }
}

/// Check whether a table or view named `name` exists on `conn`.
///
/// Unqualified names are looked up in the `main` schema.
pub fn relation_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let (schema, table) = match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("main", name),
    };

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = ? AND table_name = ?",
            duckdb::params![schema, table],
            |row| row.get(0),
        )
        .map_err(|e| DbError::ExecutionError(e.to_string()))?;

    Ok(count > 0)
}

#[cfg(test)]
#[path = "database_test.rs"]
mod tests;
