//! The ordered collection of migrations one invocation works on.

use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use crate::version::Version;

/// Sort direction for [`MigrationSet::sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first (upgrade order)
    Ascending,
    /// Newest first (downgrade order)
    Descending,
}

/// Validated migrations in discovery order.
///
/// Duplicate versions are tolerated until a target needs resolving; see
/// [`MigrationSet::resolve_target`].
#[derive(Debug, Default)]
pub struct MigrationSet {
    migrations: Vec<Migration>,
}

impl MigrationSet {
    pub fn new(migrations: Vec<Migration>) -> Self {
        Self { migrations }
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.iter()
    }

    /// Borrow the migrations sorted by version.
    ///
    /// The sort is stable: migrations sharing a version keep their discovery
    /// order in both directions.
    pub fn sorted(&self, order: SortOrder) -> Vec<&Migration> {
        let mut sorted: Vec<&Migration> = self.migrations.iter().collect();
        match order {
            SortOrder::Ascending => sorted.sort_by(|a, b| a.version().cmp(b.version())),
            SortOrder::Descending => sorted.sort_by(|a, b| b.version().cmp(a.version())),
        }
        sorted
    }

    /// True if any migration carries `version`.
    pub fn exists(&self, version: &str) -> bool {
        self.migrations.iter().any(|m| m.version() == version)
    }

    /// Find the single migration a requested target refers to.
    ///
    /// Fails with `UnknownVersion` if none matches and `AmbiguousVersion` if
    /// more than one does.
    pub fn resolve_target(&self, version: &str) -> CoreResult<&Migration> {
        let mut matches = self.migrations.iter().filter(|m| m.version() == version);
        let first = matches.next().ok_or_else(|| CoreError::UnknownVersion {
            version: version.to_string(),
        })?;
        let extra = matches.count();
        if extra > 0 {
            return Err(CoreError::AmbiguousVersion {
                version: version.to_string(),
                count: extra + 1,
            });
        }
        Ok(first)
    }

    /// The highest version in the set.
    pub fn latest(&self) -> Option<&Version> {
        self.migrations.iter().map(Migration::version).max()
    }
}

impl FromIterator<Migration> for MigrationSet {
    fn from_iter<I: IntoIterator<Item = Migration>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MigrationSet {
    type Item = &'a Migration;
    type IntoIter = std::slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.migrations.iter()
    }
}
