//! Paths command handler.

use anyhow::Result;

use crate::bootstrap::CliConfig;

/// Print the resolved database path.
pub fn execute(config: &CliConfig) -> Result<()> {
    println!("database = {}", config.database_path.display());
    Ok(())
}
