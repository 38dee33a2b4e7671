//! Command handlers that delegate to `RosterCore`.
//!
//! Handlers follow one pattern: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`.
//! They call the core, convert its errors to `CliError`, and print the
//! rendered result.

pub mod find;
pub mod members;
pub mod paths;
pub mod seed;
pub mod serve;
pub mod stats;
pub mod teams;
