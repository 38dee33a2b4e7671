//! Teams command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::teams_table;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let teams = ctx.core().teams().list().await.map_err(CliError::from)?;

    if teams.is_empty() {
        println!("No teams found.");
        return Ok(());
    }

    print!("{}", teams_table(&teams));
    Ok(())
}
