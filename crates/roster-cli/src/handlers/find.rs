//! Find command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::members_table;

/// Look up the single member with `username`.
///
/// No match is a `NotFound` error; several matches are rejected as
/// ambiguous.
pub async fn execute(ctx: &CliContext, username: &str) -> Result<()> {
    let member = ctx
        .core()
        .members()
        .find_by_username(username)
        .await
        .map_err(CliError::from)?
        .ok_or_else(|| CliError::NotFound(format!("no member with username '{username}'")))?;

    print!("{}", members_table(std::slice::from_ref(&member)));
    Ok(())
}
