//! Scaffolding for new migration files.

use crate::error::{CoreError, CoreResult};
use crate::source::{DOWNGRADE_MARKER, UPGRADE_MARKER};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// `strftime` format of a version timestamp.
const VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

/// Create a new, empty migration named `name` in `directory`.
///
/// The file is called `<UTC timestamp>_<name>.sql`, with spaces in the name
/// replaced by underscores. Returns the path of the new file.
pub fn create_migration(name: &str, directory: &Path) -> CoreResult<PathBuf> {
    create_migration_at(name, directory, Utc::now())
}

/// [`create_migration`] with an explicit timestamp.
pub fn create_migration_at(name: &str, directory: &Path, now: DateTime<Utc>) -> CoreResult<PathBuf> {
    validate_name(name)?;
    if !directory.is_dir() {
        return Err(CoreError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }

    let version = now.format(VERSION_FORMAT).to_string();
    let file_name = format!("{version}_{}.sql", name.trim().replace(' ', "_"));
    let path = directory.join(file_name);
    if path.exists() {
        return Err(CoreError::MigrationExists { path });
    }

    std::fs::write(&path, render_template(name.trim(), &version)).map_err(|source| {
        CoreError::Io {
            path: path.clone(),
            source,
        }
    })?;
    log::debug!("Created migration {}", path.display());
    Ok(path)
}

fn validate_name(name: &str) -> CoreResult<()> {
    let invalid = |reason: &str| CoreError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if trimmed.contains('/') || trimmed.contains('\\') || trimmed.contains("..") {
        return Err(invalid("must not contain '/', '\\', or '..'"));
    }
    Ok(())
}

fn render_template(name: &str, version: &str) -> String {
    format!(
        "-- This file contains a Caribou migration.\n\
         --\n\
         -- Migration Name: {name}\n\
         -- Migration Version: {version}\n\
         \n\
         {UPGRADE_MARKER}\n\
         -- add your upgrade step here\n\
         \n\
         {DOWNGRADE_MARKER}\n\
         -- add your downgrade step here\n"
    )
}
