//! Error types for cb-core

use cb_db::DbError;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Caribou
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Migration identity does not start with a 14-digit UTC timestamp
    #[error(
        "[C001] Migration names must start with a UTC timestamp (optionally prefixed with 'v'). \
         Invalid name: {identity}"
    )]
    InvalidIdentifier { identity: String },

    /// C002: Migration is structurally invalid
    #[error("[C002] Invalid migration {migration}: {reason}")]
    InvalidMigration { migration: String, reason: String },

    /// C003: Requested target matches no migration
    #[error("[C003] No migration with version {version} exists")]
    UnknownVersion { version: String },

    /// C004: Requested target matches more than one migration
    #[error("[C004] Version {version} is ambiguous: {count} migrations share it")]
    AmbiguousVersion { version: String, count: usize },

    /// C005: Downgrade against a database without a version marker
    #[error("[C005] The database {database} is not version controlled")]
    NotVersionControlled { database: String },

    /// C006: A migration step failed and was rolled back
    #[error("[C006] Migration {version} ({name}) failed and was rolled back")]
    TransactionFailure {
        version: String,
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// C007: Path expected to be a directory is not one
    #[error("[C007] {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// C008: Invalid migration name for scaffolding
    #[error("[C008] Invalid migration name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// C009: Configuration file not found
    #[error("[C009] Config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// C010: Configuration file could not be parsed
    #[error("[C010] Failed to parse config {}: {message}", path.display())]
    ConfigParseError { path: PathBuf, message: String },

    /// C011: IO error with the path that caused it
    #[error("[C011] IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// C012: Scaffolding would overwrite an existing migration file
    #[error("[C012] Migration file already exists: {}", path.display())]
    MigrationExists { path: PathBuf },

    /// Database layer error
    #[error(transparent)]
    Db(#[from] DbError),
}

impl CoreError {
    /// Faults raised while loading migrations. These usually point at a bug in
    /// a migration file and deserve full diagnostics.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidIdentifier { .. } | CoreError::InvalidMigration { .. }
        )
    }

    /// Faults caused by how the tool was invoked. A one-line message is enough.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            CoreError::UnknownVersion { .. }
                | CoreError::AmbiguousVersion { .. }
                | CoreError::NotVersionControlled { .. }
                | CoreError::NotADirectory { .. }
                | CoreError::InvalidName { .. }
                | CoreError::MigrationExists { .. }
                | CoreError::ConfigNotFound { .. }
                | CoreError::ConfigParseError { .. }
        )
    }
}

impl From<duckdb::Error> for CoreError {
    fn from(err: duckdb::Error) -> Self {
        CoreError::Db(DbError::from(err))
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
