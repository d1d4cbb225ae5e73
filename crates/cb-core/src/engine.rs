//! The upgrade/downgrade walk.
//!
//! Both directions sort the set, compare every migration against the version
//! currently recorded in the database, and apply the ones in range one step
//! at a time. A step is the migration's action plus the version-marker write,
//! committed together in one transaction. A failing step is rolled back and
//! the walk stops there; earlier steps stay committed, so re-running the same
//! operation resumes where it left off.

use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use crate::migration_set::{MigrationSet, SortOrder};
use crate::version::Version;
use crate::version_store::{write_version, VersionStore};
use cb_db::with_transaction;
use duckdb::Connection;
use std::collections::HashSet;
use std::fmt;

/// Label used in messages when the caller did not name the database.
const UNNAMED_DATABASE: &str = "<connection>";

/// Outcome of an upgrade or downgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// True when this run created the version table.
    pub initialized: bool,
    /// Versions whose action ran, in execution order.
    pub applied: Vec<Version>,
    /// The version recorded when the walk finished.
    pub final_version: Version,
}

impl MigrationReport {
    /// True when no migration action ran.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Upgrading"),
            Direction::Down => write!(f, "Downgrading"),
        }
    }
}

/// Runs migrations against a borrowed connection.
///
/// The connection is never closed here.
pub struct Migrator<'conn> {
    conn: &'conn Connection,
    store: VersionStore<'conn>,
    database: String,
}

impl<'conn> Migrator<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            store: VersionStore::new(conn),
            database: UNNAMED_DATABASE.to_string(),
        }
    }

    /// Name the database in error messages (usually its URL).
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database = name.into();
        self
    }

    pub fn store(&self) -> VersionStore<'conn> {
        self.store
    }

    /// Apply every migration newer than the recorded version, up to and
    /// including `target` (or all of them when `target` is `None`).
    ///
    /// Puts the database under version control first if needed. An unknown
    /// target fails before anything is touched.
    pub fn upgrade(&self, set: &MigrationSet, target: Option<&str>) -> CoreResult<MigrationReport> {
        let target = match target {
            Some(t) => Some(set.resolve_target(t)?.version().clone()),
            None => None,
        };

        let mut initialized = false;
        if !self.store.is_version_controlled()? {
            self.store.initialize()?;
            initialized = true;
        }
        let mut current = self.store.current_version()?.unwrap_or_else(Version::zero);
        warn_duplicates(set);

        let mut applied = Vec::new();
        for migration in set.sorted(SortOrder::Ascending) {
            let version = migration.version();
            if *version <= current {
                log::debug!("Skipping {version}: already applied (database at {current})");
                continue;
            }
            if let Some(target) = &target {
                if version > target {
                    log::debug!("Stopping before {version}: past target {target}");
                    break;
                }
            }

            self.run_step(migration, Direction::Up, version)?;
            current = version.clone();
            applied.push(current.clone());
        }

        Ok(MigrationReport {
            initialized,
            applied,
            final_version: current,
        })
    }

    /// Revert every applied migration newer than `target`.
    ///
    /// `None` or `"0"` reverts everything. Any other target must name a
    /// migration in the set. The database must already be under version
    /// control.
    pub fn downgrade(&self, set: &MigrationSet, target: Option<&str>) -> CoreResult<MigrationReport> {
        let target = match target {
            None => Version::zero(),
            Some(t) if t == Version::zero().as_str() => Version::zero(),
            Some(t) => set.resolve_target(t)?.version().clone(),
        };

        let Some(mut current) = self.store.current_version()? else {
            return Err(CoreError::NotVersionControlled {
                database: self.database.clone(),
            });
        };
        warn_duplicates(set);

        let sorted = set.sorted(SortOrder::Descending);
        let mut applied = Vec::new();
        for (i, migration) in sorted.iter().enumerate() {
            let version = migration.version();
            if *version > current {
                log::debug!("Skipping {version}: not applied (database at {current})");
                continue;
            }
            if *version <= target {
                log::debug!("Stopping at {version}: reached target {target}");
                break;
            }

            // The database ends up at the next older migration, or 0.
            let next = sorted[i + 1..]
                .iter()
                .map(|m| m.version())
                .find(|v| *v < version)
                .cloned()
                .unwrap_or_else(Version::zero);

            self.run_step(migration, Direction::Down, &next)?;
            applied.push(version.clone());
            current = next;
        }

        Ok(MigrationReport {
            initialized: false,
            applied,
            final_version: current,
        })
    }

    /// Run one migration action and record `record` as the new version, in a
    /// single transaction.
    fn run_step(&self, migration: &Migration, direction: Direction, record: &Version) -> CoreResult<()> {
        log::info!("{direction} {} {}", migration.version(), migration.name());

        let failure = |source: Box<dyn std::error::Error + Send + Sync>| CoreError::TransactionFailure {
            version: migration.version().to_string(),
            name: migration.name().to_string(),
            source,
        };

        with_transaction(self.conn, |conn| -> CoreResult<()> {
            let result = match direction {
                Direction::Up => migration.upgrade(conn),
                Direction::Down => migration.downgrade(conn),
            };
            result.map_err(failure)?;
            write_version(conn, record)
        })
        .map_err(|err| match err {
            err @ CoreError::TransactionFailure { .. } => err,
            other => failure(Box::new(other)),
        })
    }
}

fn warn_duplicates(set: &MigrationSet) {
    let mut seen = HashSet::new();
    for migration in set.iter() {
        if !seen.insert(migration.version()) {
            log::warn!(
                "Duplicate migration version {}: only the first of them is applied",
                migration.version()
            );
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
