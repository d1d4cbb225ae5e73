//! Info command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::context::Settings;

/// Execute the info command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    println!("caribou {}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::resolve(global)?;
    println!("  migrations: {}", settings.migrations_dir.display());
    println!(
        "  database:   {}",
        settings.database.as_deref().unwrap_or("(not set)")
    );
    Ok(())
}
