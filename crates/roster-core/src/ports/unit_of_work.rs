//! Scoped sessions: one store transaction per unit of work.
//!
//! A service that issues more than one statement for a single request opens
//! a [`Session`], runs every statement through the session's repositories
//! and ends it with [`Session::finish`]. The store commits when the work
//! succeeded and rolls back otherwise. A session that is dropped without
//! being finished is rolled back by the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::{CoreError, MemberQueryExecutor, MemberRepository, RepositoryError, TeamRepository};

/// Opens scoped sessions against the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Acquire one connection from the pool and begin a transaction on it.
    async fn begin(&self) -> Result<Session, RepositoryError>;
}

/// Ends the transaction behind a [`Session`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionHandle: Send + Sync {
    async fn commit(&self) -> Result<(), RepositoryError>;

    async fn rollback(&self) -> Result<(), RepositoryError>;
}

/// Repositories bound to one open transaction.
pub struct Session {
    pub members: Arc<dyn MemberRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub queries: Arc<dyn MemberQueryExecutor>,
    handle: Box<dyn SessionHandle>,
}

impl Session {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        teams: Arc<dyn TeamRepository>,
        queries: Arc<dyn MemberQueryExecutor>,
        handle: Box<dyn SessionHandle>,
    ) -> Self {
        Self {
            members,
            teams,
            queries,
            handle,
        }
    }

    /// Commit on `Ok`, roll back on `Err`, and hand the outcome back.
    ///
    /// A failed commit turns the outcome into an error. A failed rollback is
    /// logged and the original error is returned.
    pub async fn finish<T>(self, outcome: Result<T, CoreError>) -> Result<T, CoreError> {
        match outcome {
            Ok(value) => {
                self.handle.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = self.handle.rollback().await {
                    warn!(target: "roster.session", error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
