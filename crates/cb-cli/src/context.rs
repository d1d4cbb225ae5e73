//! Runtime settings for CLI commands

use anyhow::Result;
use cb_core::config::resolve_database_url;
use cb_core::{Config, SqlDirectory};
use std::path::PathBuf;

use crate::cli::GlobalArgs;

/// Settings resolved from `caribou.yml` and the global flags.
///
/// Flags win over the config file; relative paths resolve against the
/// project directory.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// Directory holding the migration files
    pub migrations_dir: PathBuf,

    /// Database URL, if one was configured
    pub database: Option<String>,
}

impl Settings {
    /// Resolve settings from global arguments
    pub(crate) fn resolve(global: &GlobalArgs) -> Result<Self> {
        let root = &global.project_dir;
        let config = match &global.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(root)?,
        };

        let migrations_dir = match &global.migration_dir {
            Some(dir) => root.join(dir),
            None => config.migrations_dir_absolute(root),
        };
        let database = match &global.database {
            Some(url) => Some(resolve_database_url(url, root)),
            None => config.database_url(root),
        };

        log::debug!(
            "Resolved settings: migrations_dir={}, database={:?}",
            migrations_dir.display(),
            database
        );
        Ok(Self {
            migrations_dir,
            database,
        })
    }

    /// The configured database, or a usage error naming how to set one
    pub(crate) fn require_database(&self) -> Result<&str> {
        match self.database.as_deref() {
            Some(url) => Ok(url),
            None => anyhow::bail!(
                "No database given: pass --database or set `database` in caribou.yml"
            ),
        }
    }

    /// The migration directory as a migration source
    pub(crate) fn source(&self) -> SqlDirectory {
        SqlDirectory::new(&self.migrations_dir)
    }
}
