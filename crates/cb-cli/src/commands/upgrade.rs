//! Upgrade command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, UpgradeArgs};
use crate::context::Settings;

/// Execute the upgrade command
pub(crate) fn execute(args: &UpgradeArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let url = settings.require_database()?;

    match args.version.as_deref() {
        Some(version) => println!("upgrading db [{url}] to version [{version}]"),
        None => println!("upgrading db [{url}] to most recent version"),
    }

    let report = cb_core::upgrade_database(url, &settings.source(), args.version.as_deref())?;

    if global.verbose {
        for version in &report.applied {
            println!("  applied {version}");
        }
    }
    if report.is_noop() {
        println!("db [{url}] is already at version [{}]", report.final_version);
    } else {
        println!(
            "upgraded [{url}] successfully to version [{}]",
            report.final_version
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "upgrade_test.rs"]
mod tests;
