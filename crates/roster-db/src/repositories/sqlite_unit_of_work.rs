//! `SQLite` implementation of the `UnitOfWork` port.

use std::sync::Arc;

use async_trait::async_trait;

use roster_core::{RepositoryError, Session, SessionHandle, UnitOfWork};

use super::store::Store;
use super::{SqliteMemberRepository, SqliteQueryExecutor, SqliteTeamRepository};

/// Opens sessions whose repositories share one transaction.
pub struct SqliteUnitOfWork {
    store: Store,
}

impl SqliteUnitOfWork {
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn begin(&self) -> Result<Session, RepositoryError> {
        let scoped = self.store.begin().await?;
        Ok(Session::new(
            Arc::new(SqliteMemberRepository::new(scoped.clone())),
            Arc::new(SqliteTeamRepository::new(scoped.clone())),
            Arc::new(SqliteQueryExecutor::new(scoped.clone())),
            Box::new(SqliteSession { store: scoped }),
        ))
    }
}

struct SqliteSession {
    store: Store,
}

#[async_trait]
impl SessionHandle for SqliteSession {
    async fn commit(&self) -> Result<(), RepositoryError> {
        self.store.commit().await
    }

    async fn rollback(&self) -> Result<(), RepositoryError> {
        self.store.rollback().await
    }
}
