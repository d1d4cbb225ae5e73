//! Downgrade command implementation

use anyhow::Result;

use crate::cli::{DowngradeArgs, GlobalArgs};
use crate::context::Settings;

/// Execute the downgrade command
pub(crate) fn execute(args: &DowngradeArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let url = settings.require_database()?;

    println!("downgrading db [{url}] to version [{}]", args.version);

    let report = cb_core::downgrade_database(url, &settings.source(), Some(&args.version))?;

    if global.verbose {
        for version in &report.applied {
            println!("  reverted {version}");
        }
    }
    println!(
        "downgraded [{url}] successfully to version [{}]",
        report.final_version
    );
    Ok(())
}
