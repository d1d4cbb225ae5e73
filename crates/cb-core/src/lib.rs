//! cb-core - Core library for Caribou
//!
//! Tracks and applies ordered, versioned schema migrations to an embedded
//! DuckDB database. The currently applied version lives inside the database
//! itself, in the single-row `migration_version` table.
//!
//! The pieces, leaves first:
//!
//! - [`version`]: parses `20091112130101_name` / `v20091112130101_name`
//!   identifiers into a sortable [`Version`] and a display name.
//! - [`migration`]: a validated [`Migration`] unit with upgrade and downgrade
//!   actions.
//! - [`migration_set`]: the ordered [`MigrationSet`] one invocation works on.
//! - [`source`]: where raw migrations come from (a directory of `.sql` files or
//!   code units supplied by the caller).
//! - [`version_store`]: reads and writes the persisted version marker.
//! - [`engine`]: the upgrade/downgrade walk.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod migration;
pub mod migration_set;
pub mod scaffold;
pub mod source;
pub mod version;
pub mod version_store;

pub use api::{
    current_version, database_version, downgrade, downgrade_database, load_migrations, upgrade,
    upgrade_database,
};
pub use config::Config;
pub use engine::{MigrationReport, Migrator};
pub use error::{CoreError, CoreResult};
pub use migration::{Action, ActionError, Migration, MigrationCode};
pub use migration_set::{MigrationSet, SortOrder};
pub use scaffold::create_migration;
pub use source::{CodeMigrations, MigrationSource, RawMigration, SqlDirectory};
pub use version::{normalize_version, parse_file_stem, parse_identifier, Version, VERSION_LENGTH};
pub use version_store::{VersionStore, VERSION_TABLE};
