//! Migration sources.
//!
//! A [`MigrationSource`] yields raw, unvalidated migration definitions. Two
//! sources ship with the crate:
//!
//! - [`SqlDirectory`]: every `*.sql` file in a directory. The file stem is the
//!   identity (`20091112130101_create_games.sql`), and the body holds an
//!   upgrade and a downgrade section:
//!
//!   ```sql
//!   -- upgrade
//!   CREATE TABLE games (id INTEGER, name VARCHAR);
//!
//!   -- downgrade
//!   DROP TABLE games;
//!   ```
//!
//! - [`CodeMigrations`]: code units supplied directly by the caller, for
//!   applications that compile their migrations in.

use crate::error::{CoreError, CoreResult};
use crate::migration::{Migration, MigrationCode};
use crate::migration_set::MigrationSet;
use duckdb::Connection;
use std::path::{Path, PathBuf};

/// Marker line that starts the upgrade section of a SQL migration file.
pub const UPGRADE_MARKER: &str = "-- upgrade";

/// Marker line that starts the downgrade section of a SQL migration file.
pub const DOWNGRADE_MARKER: &str = "-- downgrade";

/// A migration definition as produced by a source, before validation.
#[derive(Debug)]
pub enum RawMigration {
    /// Code with an external identity, such as a file discovered on disk.
    Identified {
        identity: String,
        path: Option<PathBuf>,
        code: MigrationCode,
    },
    /// A migration file, identified by its file stem.
    File { path: PathBuf, code: MigrationCode },
    /// A code unit that names itself.
    Code(MigrationCode),
}

impl RawMigration {
    /// Validate into a [`Migration`].
    pub fn into_migration(self) -> CoreResult<Migration> {
        match self {
            RawMigration::Identified {
                identity,
                path,
                code,
            } => {
                let migration = Migration::from_identity(&identity, code)?;
                Ok(match path {
                    Some(path) => migration.with_path(path),
                    None => migration,
                })
            }
            RawMigration::File { path, code } => Migration::from_file(path, code),
            RawMigration::Code(code) => Migration::from_code(code),
        }
    }
}

/// Anything that can produce raw migration definitions.
pub trait MigrationSource {
    /// Produce the raw definitions, in discovery order.
    fn load(&self) -> CoreResult<Vec<RawMigration>>;

    /// Human-readable description for messages.
    fn describe(&self) -> String;
}

/// Load and validate every migration of `source`.
///
/// A single invalid migration fails the whole load; no partial set is ever
/// returned.
pub fn load_migrations<S: MigrationSource + ?Sized>(source: &S) -> CoreResult<MigrationSet> {
    let raw = source.load()?;
    let migrations = raw
        .into_iter()
        .map(RawMigration::into_migration)
        .collect::<CoreResult<Vec<_>>>()?;
    log::debug!(
        "Loaded {} migrations from {}",
        migrations.len(),
        source.describe()
    );
    Ok(MigrationSet::new(migrations))
}

/// A directory of `*.sql` migration files.
#[derive(Debug, Clone)]
pub struct SqlDirectory {
    dir: PathBuf,
}

impl SqlDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Discover migration files, sorted by path.
    fn discover(&self) -> CoreResult<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(CoreError::NotADirectory {
                path: self.dir.clone(),
            });
        }

        let escaped = glob::Pattern::escape(&self.dir.to_string_lossy());
        let pattern = Path::new(&escaped).join("*.sql");
        let entries = glob::glob(&pattern.to_string_lossy()).map_err(|e| CoreError::Io {
            path: self.dir.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CoreError::Io {
                path: e.path().to_path_buf(),
                source: std::io::Error::from(e),
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl MigrationSource for SqlDirectory {
    fn load(&self) -> CoreResult<Vec<RawMigration>> {
        self.discover()?
            .into_iter()
            .map(|path| load_sql_file(&path))
            .collect()
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

fn load_sql_file(path: &Path) -> CoreResult<RawMigration> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Reject bad names before reading the file.
    if crate::version::parse_file_stem(&stem).is_none() {
        return Err(CoreError::InvalidIdentifier {
            identity: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| CoreError::InvalidMigration {
        migration: path.display().to_string(),
        reason: format!("failed to read file: {e}"),
    })?;

    Ok(RawMigration::File {
        path: path.to_path_buf(),
        code: parse_sql_migration(&path.display().to_string(), &contents),
    })
}

/// Split a SQL migration file into a code unit.
///
/// A section is absent when its marker line is missing; [`Migration`]
/// validation then names it.
pub fn parse_sql_migration(name: &str, contents: &str) -> MigrationCode {
    enum Section {
        Preamble,
        Upgrade,
        Downgrade,
    }

    let mut section = Section::Preamble;
    let mut upgrade: Option<String> = None;
    let mut downgrade: Option<String> = None;

    for line in contents.lines() {
        let marker = line.trim();
        if marker.eq_ignore_ascii_case(UPGRADE_MARKER) {
            section = Section::Upgrade;
            upgrade.get_or_insert_with(String::new);
            continue;
        }
        if marker.eq_ignore_ascii_case(DOWNGRADE_MARKER) {
            section = Section::Downgrade;
            downgrade.get_or_insert_with(String::new);
            continue;
        }
        let target = match section {
            Section::Preamble => continue,
            Section::Upgrade => upgrade.as_mut(),
            Section::Downgrade => downgrade.as_mut(),
        };
        if let Some(sql) = target {
            sql.push_str(line);
            sql.push('\n');
        }
    }

    let mut code = MigrationCode::new(name);
    if let Some(sql) = upgrade {
        code = code.upgrade(move |conn| run_sql(conn, &sql));
    }
    if let Some(sql) = downgrade {
        code = code.downgrade(move |conn| run_sql(conn, &sql));
    }
    code
}

fn run_sql(conn: &Connection, sql: &str) -> Result<(), crate::migration::ActionError> {
    if is_blank_sql(sql) {
        return Ok(());
    }
    conn.execute_batch(sql)?;
    Ok(())
}

/// True when `sql` holds nothing but whitespace and `--` comments.
fn is_blank_sql(sql: &str) -> bool {
    sql.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("--"))
}

/// Code units handed over directly by the caller.
#[derive(Debug, Clone, Default)]
pub struct CodeMigrations {
    units: Vec<MigrationCode>,
}

impl CodeMigrations {
    pub fn new(units: Vec<MigrationCode>) -> Self {
        Self { units }
    }
}

impl From<Vec<MigrationCode>> for CodeMigrations {
    fn from(units: Vec<MigrationCode>) -> Self {
        Self::new(units)
    }
}

impl MigrationSource for CodeMigrations {
    fn load(&self) -> CoreResult<Vec<RawMigration>> {
        Ok(self.units.iter().cloned().map(RawMigration::Code).collect())
    }

    fn describe(&self) -> String {
        "code migrations".to_string()
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
