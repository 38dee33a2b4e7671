//! Serve command handler.

use anyhow::Result;
use roster_axum::{ServerConfig, start_server};
use tracing::info;

use crate::bootstrap::CliConfig;

/// Start the HTTP server and run until it stops.
pub async fn execute(config: &CliConfig, port: u16, seed: bool) -> Result<()> {
    let server = ServerConfig::new(&config.database_path)
        .with_port(port)
        .with_seed(seed)
        .with_store_timeout(config.store_timeout);

    info!(port, seed, database = %config.database_path.display(), "starting server");
    start_server(server).await
}
