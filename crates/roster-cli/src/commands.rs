//! Main commands enum.

use clap::Subcommand;

use roster_axum::bootstrap::DEFAULT_PORT;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(long, env = "ROSTER_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Insert the sample roster first when the database has no teams
        #[arg(long)]
        seed: bool,
    },

    /// Insert teamA/teamB and member1..member4 in one transaction
    Seed,

    /// List members
    Members {
        /// Load each member's team in the same statement
        #[arg(long)]
        deep: bool,
    },

    /// List teams
    Teams,

    /// Look a member up by username
    Find {
        /// Username to look up
        username: String,
    },

    /// Show age aggregates and per-team averages
    Stats,

    /// Show the resolved database path
    Paths,
}
