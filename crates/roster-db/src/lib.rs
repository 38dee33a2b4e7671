//! `SQLite` adapter for roster.
//!
//! Implements the `roster-core` ports on top of `sqlx`:
//!
//! - [`SqliteMemberRepository`] and [`SqliteTeamRepository`] for CRUD
//! - [`SqliteQueryExecutor`] which renders the typed query AST to SQL
//! - [`SqliteUnitOfWork`] for transactions spanning several statements
//! - [`seed_sample_data`] for the transactional sample roster
//!
//! Every statement goes through one [`Store`], which counts round trips and
//! bounds each call with the configured store timeout.

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod seed;
pub mod setup;

pub use factory::CoreFactory;

#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{
    SqliteMemberRepository, SqliteQueryExecutor, SqliteTeamRepository, SqliteUnitOfWork, Store,
};

pub use seed::{SeedOutcome, seed_sample_data};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
