//! CLI bootstrap - the composition root.
//!
//! Command handlers receive the composed `CliContext` and delegate work to
//! `RosterCore`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use roster_core::{RosterCore, resolve_database_path};
use roster_db::repositories::DEFAULT_STORE_TIMEOUT;
use roster_db::{CoreFactory, Store, setup_database};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Database file.
    pub database_path: PathBuf,
    /// Bound on a single store call.
    pub store_timeout: Duration,
}

impl CliConfig {
    /// Resolve the database path from `--db` (or `ROSTER_DB_PATH`), falling
    /// back to the platform data directory.
    pub fn resolve(db: Option<&str>) -> Result<Self, CliError> {
        Ok(Self {
            database_path: resolve_database_path(db)?,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    core: RosterCore,
    store: Store,
}

impl CliContext {
    /// Compose the context over an existing store.
    pub fn from_store(store: Store) -> Self {
        Self {
            core: RosterCore::new(CoreFactory::repos_for(&store)),
            store,
        }
    }

    pub const fn core(&self) -> &RosterCore {
        &self.core
    }

    /// The store, for operations that run below the services (seeding).
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

/// Open the database and compose `RosterCore`.
pub async fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let pool = setup_database(&config.database_path).await?;
    let store = CoreFactory::store(pool, config.store_timeout);
    Ok(CliContext::from_store(store))
}
