//! Create command implementation - scaffolds a new migration file

use anyhow::Result;

use crate::cli::{CreateArgs, GlobalArgs};
use crate::context::Settings;

/// Execute the create command
pub(crate) fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let path = cb_core::create_migration(&args.name, &settings.migrations_dir)?;
    println!("created migration {}", path.display());
    Ok(())
}
