//! Stats command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::stats_table;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let members = ctx.core().members();
    let summary = members.age_summary().await.map_err(CliError::from)?;
    let teams = members.average_age_by_team().await.map_err(CliError::from)?;

    print!("{}", stats_table(&summary, &teams));
    Ok(())
}
