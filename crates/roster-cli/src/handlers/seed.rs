//! Seed command handler.

use anyhow::Result;
use roster_db::{SeedOutcome, seed_sample_data};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Insert the sample roster unless teams already exist.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    match seed_sample_data(ctx.store()).await.map_err(CliError::from)? {
        SeedOutcome::Seeded { teams, members } => {
            println!("Seeded {teams} team(s) and {members} member(s).");
        }
        SeedOutcome::AlreadyPresent => {
            println!("Database already has teams; nothing seeded.");
        }
    }
    Ok(())
}
