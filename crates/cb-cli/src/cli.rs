//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Caribou - versioned schema migrations for embedded DuckDB databases
#[derive(Parser, Debug)]
#[command(name = "caribou")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path (default: <project-dir>/caribou.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database to migrate: a file path or ":memory:"
    #[arg(short = 'D', long, global = true, env = "CARIBOU_DATABASE")]
    pub database: Option<String>,

    /// Directory containing the migration files
    #[arg(short = 'd', long, global = true)]
    pub migration_dir: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new, empty migration file
    Create(CreateArgs),

    /// Print the version the database is at
    Version,

    /// Apply migrations up to a version (default: the latest)
    Upgrade(UpgradeArgs),

    /// Revert migrations down to a version (0 reverts everything)
    Downgrade(DowngradeArgs),

    /// List the migrations in the migration directory
    List(ListArgs),

    /// Print information about this tool
    Info,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the migration (spaces become underscores)
    pub name: String,
}

/// Arguments for the upgrade command
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Target version (default: the latest migration)
    pub version: Option<String>,
}

/// Arguments for the downgrade command
#[derive(Args, Debug)]
pub struct DowngradeArgs {
    /// Target version; 0 reverts every migration
    pub version: String,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: ListOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutput {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
