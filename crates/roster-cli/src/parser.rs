//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the roster data-access layer.
#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Query and serve a member/team roster")]
#[command(version)]
pub struct Cli {
    /// Database file for this invocation
    #[arg(long = "db", env = "ROSTER_DB_PATH", global = true)]
    pub db: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
