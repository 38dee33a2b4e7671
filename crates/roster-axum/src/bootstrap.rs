//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where infrastructure is wired together
//! for the web adapter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use roster_core::RosterCore;
use roster_core::paths::database_path;
use roster_db::repositories::DEFAULT_STORE_TIMEOUT;
use roster_db::{CoreFactory, SeedOutcome, seed_sample_data, setup_database};
use tracing::info;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 9887;

/// Default bound on a whole HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// `SQLite` database file.
    pub database_path: PathBuf,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Bound on a whole request, including every store call it makes.
    pub request_timeout: Duration,
    /// Bound on a single store call.
    pub store_timeout: Duration,
    /// Insert the sample roster at startup when the database has no teams.
    pub seed: bool,
}

impl ServerConfig {
    /// Config for an explicit database file with default settings.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: database_path.into(),
            cors: CorsConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            seed: false,
        }
    }

    /// Create config with the default database path.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(database_path()?))
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<RosterCore>,
}

impl AxumContext {
    pub fn new(core: RosterCore) -> Self {
        Self {
            core: Arc::new(core),
        }
    }
}

/// Open the database, seed it if asked, and assemble `RosterCore`.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    info!(
        target: "roster.paths",
        database_path = %config.database_path.display(),
        "Axum bootstrap resolved paths"
    );

    let pool = setup_database(&config.database_path).await?;
    let store = CoreFactory::store(pool, config.store_timeout);

    if config.seed {
        match seed_sample_data(&store).await? {
            SeedOutcome::Seeded { teams, members } => {
                info!(target: "roster.seed", teams, members, "seeded sample roster at startup");
            }
            SeedOutcome::AlreadyPresent => {}
        }
    }

    let core = RosterCore::new(CoreFactory::repos_for(&store));
    Ok(AxumContext::new(core))
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors, config.request_timeout);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("roster web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::FetchMode;

    #[test]
    fn builder_overrides_defaults() {
        let config = ServerConfig::new("/tmp/roster.db")
            .with_port(8080)
            .with_seed(true)
            .with_store_timeout(Duration::from_millis(250))
            .with_allowed_origins(vec!["http://localhost:3000".into()]);

        assert_eq!(config.port, 8080);
        assert!(config.seed);
        assert_eq!(config.store_timeout, Duration::from_millis(250));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(matches!(config.cors, CorsConfig::AllowOrigins(ref o) if o.len() == 1));
    }

    #[tokio::test]
    async fn bootstrap_seeds_on_disk_database_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::new(dir.path().join("roster.db")).with_seed(true);

        let first = bootstrap(&config).await.unwrap();
        assert_eq!(first.core.members().list(FetchMode::Shallow).await.unwrap().len(), 4);

        let second = bootstrap(&config).await.unwrap();
        assert_eq!(second.core.teams().list().await.unwrap().len(), 2);
    }
}
