//! cb-db - Embedded database layer for Caribou
//!
//! This crate owns the DuckDB connection that migrations run against, and the
//! `BEGIN` / `COMMIT` / `ROLLBACK` helper every schema step is wrapped in.

pub mod database;
pub mod error;
pub mod transaction;

pub use database::{relation_exists, Database, MEMORY_URL};
pub use error::{DbError, DbResult};
pub use transaction::with_transaction;

/// Re-export of the driver connection type handed to migration actions.
pub use duckdb::Connection;
