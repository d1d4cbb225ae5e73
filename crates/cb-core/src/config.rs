//! Project configuration from `caribou.yml`

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "caribou.yml";

/// Project configuration.
///
/// Every field is optional; command-line flags override the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database URL: a file path or `:memory:`
    #[serde(default)]
    pub database: Option<String>,

    /// Directory holding the `.sql` migration files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            migrations_dir: default_migrations_dir(),
        }
    }
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Load `caribou.yml` from `dir`, or the defaults when there is none.
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            log::debug!("No {CONFIG_FILE} in {}; using defaults", dir.display());
            Ok(Self::default())
        }
    }

    fn parse(path: &Path, contents: &str) -> CoreResult<Self> {
        // An empty file is a valid, all-defaults config.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|e| CoreError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The migrations directory resolved against `root`.
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// The database URL resolved against `root`. `:memory:` is left alone.
    pub fn database_url(&self, root: &Path) -> Option<String> {
        self.database.as_deref().map(|db| resolve_database_url(db, root))
    }
}

/// Resolve a database URL against `root`, leaving `:memory:` and absolute
/// paths untouched.
pub fn resolve_database_url(url: &str, root: &Path) -> String {
    if url == cb_db::MEMORY_URL {
        url.to_string()
    } else {
        root.join(url).display().to_string()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
