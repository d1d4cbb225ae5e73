//! Migration units.
//!
//! A [`Migration`] is one validated schema-change step: a version, a display
//! name, and the two actions that apply and revert it. Units are built from a
//! [`MigrationCode`] either with an external identity (a filename stem) or
//! from the code unit's own declared name.

use crate::error::{CoreError, CoreResult};
use crate::version::{final_segment, normalize_version, parse_file_stem, parse_identifier, Version};
use duckdb::Connection;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Error type migration actions may fail with.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// An upgrade or downgrade action run against a live connection.
///
/// Shared so a code unit can be handed to several invocations.
pub type Action = Arc<dyn Fn(&Connection) -> Result<(), ActionError> + Send + Sync>;

/// A loaded code unit that has not been validated yet.
///
/// Either action may be absent; [`Migration`] construction rejects units that
/// lack one.
#[derive(Clone)]
pub struct MigrationCode {
    name: String,
    version: Option<String>,
    upgrade: Option<Action>,
    downgrade: Option<Action>,
}

impl MigrationCode {
    /// Start a code unit with its declared (module-like) name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            upgrade: None,
            downgrade: None,
        }
    }

    /// Declare an explicit version, used when the name carries none.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the upgrade action.
    pub fn upgrade<F>(mut self, action: F) -> Self
    where
        F: Fn(&Connection) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.upgrade = Some(Arc::new(action));
        self
    }

    /// Set the downgrade action.
    pub fn downgrade<F>(mut self, action: F) -> Self
    where
        F: Fn(&Connection) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.downgrade = Some(Arc::new(action));
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the required actions this unit does not provide.
    fn missing_actions(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.upgrade.is_none() {
            missing.push("upgrade");
        }
        if self.downgrade.is_none() {
            missing.push("downgrade");
        }
        missing
    }
}

impl fmt::Debug for MigrationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationCode")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("upgrade", &self.upgrade.is_some())
            .field("downgrade", &self.downgrade.is_some())
            .finish()
    }
}

/// One validated migration. Immutable after construction.
pub struct Migration {
    version: Version,
    name: String,
    path: Option<PathBuf>,
    upgrade: Action,
    downgrade: Action,
}

impl Migration {
    /// Build a migration from an external identity (e.g. a filename stem) and
    /// the code loaded for it.
    pub fn from_identity(identity: &str, code: MigrationCode) -> CoreResult<Self> {
        let (version, name) =
            parse_identifier(identity).ok_or_else(|| CoreError::InvalidIdentifier {
                identity: identity.to_string(),
            })?;
        Self::build(identity, version, name, code)
    }

    /// Build a migration from the file it was loaded from. The identity is
    /// the file stem, so `20091112130101_add_v1.2_column.sql` keeps the dot
    /// in its name.
    pub fn from_file(path: impl Into<PathBuf>, code: MigrationCode) -> CoreResult<Self> {
        let path = path.into();
        let label = path.display().to_string();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (version, name) = parse_file_stem(&stem)
            .ok_or_else(|| CoreError::InvalidIdentifier { identity: label.clone() })?;
        Ok(Self::build(&label, version, name, code)?.with_path(path))
    }

    /// Build a migration from a code unit alone.
    ///
    /// The version comes from the unit's declared name, falling back to its
    /// declared version.
    pub fn from_code(code: MigrationCode) -> CoreResult<Self> {
        let label = code.name.clone();
        let (version, name) = match parse_identifier(&code.name) {
            Some(parsed) => parsed,
            None => {
                let declared = code.version.as_deref().and_then(normalize_version);
                let version = declared.ok_or_else(|| CoreError::InvalidMigration {
                    migration: label.clone(),
                    reason: "no version could be determined".to_string(),
                })?;
                let name = final_segment(&label).to_string();
                (version, name)
            }
        };
        Self::build(&label, version, name, code)
    }

    /// Record where this migration was discovered.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn build(label: &str, version: Version, name: String, code: MigrationCode) -> CoreResult<Self> {
        let missing = code.missing_actions();
        match (code.upgrade, code.downgrade) {
            (Some(upgrade), Some(downgrade)) => Ok(Self {
                version,
                name,
                path: None,
                upgrade,
                downgrade,
            }),
            _ => Err(CoreError::InvalidMigration {
                migration: label.to_string(),
                reason: format!("missing required actions: {}", missing.join(", ")),
            }),
        }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run the upgrade action. Errors are returned as the action raised them.
    pub fn upgrade(&self, conn: &Connection) -> Result<(), ActionError> {
        (self.upgrade)(conn)
    }

    /// Run the downgrade action. Errors are returned as the action raised them.
    pub fn downgrade(&self, conn: &Connection) -> Result<(), ActionError> {
        (self.downgrade)(conn)
    }
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("version", &self.version)
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
