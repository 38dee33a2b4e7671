//! Members command handler.

use anyhow::Result;
use roster_core::FetchMode;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::members_table;

/// List members, with their teams when `deep` is set.
pub async fn execute(ctx: &CliContext, deep: bool) -> Result<()> {
    let mode = if deep {
        FetchMode::Deep
    } else {
        FetchMode::Shallow
    };
    let members = ctx.core().members().list(mode).await.map_err(CliError::from)?;

    if members.is_empty() {
        println!("No members found.");
        println!("Use 'roster seed' to load the sample roster.");
        return Ok(());
    }

    println!("Found {} member(s):\n", members.len());
    print!("{}", members_table(&members));
    Ok(())
}
