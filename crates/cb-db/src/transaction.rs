//! Transaction helper shared by every schema-changing operation.

use crate::error::DbError;
use duckdb::Connection;

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
///
/// BEGIN and COMMIT failures are reported through the caller's error type, so
/// `E` must be buildable from [`DbError`]. A failed COMMIT is followed by a
/// ROLLBACK before the error is returned.
pub fn with_transaction<T, E, F>(conn: &Connection, body: F) -> Result<T, E>
where
    F: FnOnce(&Connection) -> Result<T, E>,
    E: From<DbError>,
{
    conn.execute_batch("BEGIN TRANSACTION")
        .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

    let result = body(conn);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(DbError::TransactionError(format!("COMMIT failed: {commit_err}")).into());
            }
        }
        Err(_) => {
            if let Err(rollback_err) = conn.execute_batch("ROLLBACK") {
                log::warn!("ROLLBACK failed: {rollback_err}");
            }
        }
    }
    result
}
