//! Version command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::context::Settings;

/// Execute the version command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let settings = Settings::resolve(global)?;
    let url = settings.require_database()?;

    match cb_core::database_version(url)? {
        Some(version) => println!("the db [{url}] is at version {version}"),
        None => println!("the db [{url}] is not under version control"),
    }
    Ok(())
}
