//! List command implementation

use anyhow::{Context, Result};
use cb_core::{load_migrations, MigrationSet, SortOrder, Version};
use serde::Serialize;
use std::path::Path;

use crate::cli::{GlobalArgs, ListArgs, ListOutput};
use crate::context::Settings;

/// One row of `caribou list`
#[derive(Debug, Serialize)]
struct MigrationRow {
    version: String,
    name: String,
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<bool>,
}

/// Execute the list command
pub(crate) fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let set = load_migrations(&settings.source())?;

    let current = match settings.database.as_deref() {
        Some(url) => applied_version(url)?,
        None => None,
    };
    let rows = build_rows(&set, current.as_ref());

    match args.output {
        ListOutput::Table => print_table(&rows),
        ListOutput::Json => print_json(&rows)?,
    }
    Ok(())
}

/// The version of an existing database; never creates a database file.
fn applied_version(url: &str) -> Result<Option<Version>> {
    if url != cb_db::MEMORY_URL && !Path::new(url).exists() {
        log::debug!("Database {url} does not exist; not marking applied migrations");
        return Ok(None);
    }
    cb_core::database_version(url).with_context(|| format!("Failed to read version of {url}"))
}

fn build_rows(set: &MigrationSet, current: Option<&Version>) -> Vec<MigrationRow> {
    set.sorted(SortOrder::Ascending)
        .into_iter()
        .map(|migration| MigrationRow {
            version: migration.version().to_string(),
            name: migration.name().to_string(),
            path: migration.path().map(|p| p.display().to_string()),
            applied: current.map(|v| !v.is_zero() && migration.version() <= v),
        })
        .collect()
}

fn print_table(rows: &[MigrationRow]) {
    if rows.is_empty() {
        println!("No migrations found.");
        return;
    }

    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(4).max(4);
    let show_applied = rows.iter().any(|r| r.applied.is_some());

    if show_applied {
        println!(
            "{:<14}  {:<name_width$}  {:<7}  PATH",
            "VERSION", "NAME", "APPLIED"
        );
    } else {
        println!("{:<14}  {:<name_width$}  PATH", "VERSION", "NAME");
    }

    for row in rows {
        let path = row.path.as_deref().unwrap_or("-");
        match row.applied {
            Some(applied) => println!(
                "{:<14}  {:<name_width$}  {:<7}  {}",
                row.version,
                row.name,
                if applied { "yes" } else { "no" },
                path
            ),
            None => println!("{:<14}  {:<name_width$}  {}", row.version, row.name, path),
        }
    }

    println!();
    println!("{} migration(s)", rows.len());
}

fn print_json(rows: &[MigrationRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows).context("Failed to serialize migrations")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
