//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers which delegate to `RosterCore`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use roster_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::resolve(cli.db.as_deref())?;

    match command {
        Commands::Paths => handlers::paths::execute(&config)?,
        Commands::Serve { port, seed } => handlers::serve::execute(&config, port, seed).await?,
        Commands::Seed => handlers::seed::execute(&bootstrap(&config).await?).await?,
        Commands::Members { deep } => {
            handlers::members::execute(&bootstrap(&config).await?, deep).await?;
        }
        Commands::Teams => handlers::teams::execute(&bootstrap(&config).await?).await?,
        Commands::Find { username } => {
            handlers::find::execute(&bootstrap(&config).await?, &username).await?;
        }
        Commands::Stats => handlers::stats::execute(&bootstrap(&config).await?).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads ROSTER_* defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}
