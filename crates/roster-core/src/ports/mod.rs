//! Port definitions (trait abstractions) for the store.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain and query types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Repositories are CRUD-focused; ad-hoc reads go through
//!   [`MemberQueryExecutor`]
//! - Relationship loading is always explicit ([`FetchMode`](crate::FetchMode))
//! - Work that spans several statements runs in one [`Session`]

pub mod member_repository;
pub mod query_executor;
pub mod round_trips;
pub mod team_repository;
pub mod unit_of_work;

use std::sync::Arc;
use thiserror::Error;

pub use member_repository::MemberRepository;
pub use query_executor::MemberQueryExecutor;
pub use round_trips::RoundTrips;
pub use team_repository::TeamRepository;
pub use unit_of_work::{Session, SessionHandle, UnitOfWork};

#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use query_executor::MockMemberQueryExecutor;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
#[cfg(test)]
pub use unit_of_work::{MockSessionHandle, MockUnitOfWork};

use crate::query::QueryError;

/// Container for all repository trait objects.
///
/// Wires the store adapters into [`RosterCore`](crate::RosterCore) without
/// coupling the core to concrete implementations.
///
/// ```ignore
/// // In roster-db factory:
/// let repos = CoreFactory::build_repos(pool, store_timeout);
///
/// // In adapter bootstrap:
/// let core = RosterCore::new(repos);
/// ```
#[derive(Clone)]
pub struct Repos {
    pub members: Arc<dyn MemberRepository>,
    pub teams: Arc<dyn TeamRepository>,
    /// Typed query execution over members.
    pub queries: Arc<dyn MemberQueryExecutor>,
    /// Opens transactions for multi-statement work.
    pub sessions: Arc<dyn UnitOfWork>,
    /// Statement counter shared by every repository above.
    pub round_trips: RoundTrips,
}

impl Repos {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        teams: Arc<dyn TeamRepository>,
        queries: Arc<dyn MemberQueryExecutor>,
        sessions: Arc<dyn UnitOfWork>,
        round_trips: RoundTrips,
    ) -> Self {
        Self {
            members,
            teams,
            queries,
            sessions,
            round_trips,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A lookup that must match at most one row matched several.
    #[error("Expected at most one result for {what}, found {found}")]
    NonUnique { what: String, found: u64 },

    /// Storage backend error (connectivity, driver, decoding).
    #[error("Storage error: {0}")]
    Storage(String),

    /// The store did not answer within the configured time.
    #[error("Store call timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// A constraint was violated (e.g., foreign key, not null).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A built query failed validation before reaching the store.
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    /// A stored value could not be mapped onto a domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI
/// exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QueryError> for CoreError {
    fn from(err: QueryError) -> Self {
        Self::Repository(RepositoryError::InvalidQuery(err))
    }
}
