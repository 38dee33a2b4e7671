//! Composition utilities for building `RosterCore` with `SQLite` backends.
//!
//! Construction only. No domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

use roster_core::{Repos, RosterCore, RoundTrips};

use crate::repositories::{
    SqliteMemberRepository, SqliteQueryExecutor, SqliteTeamRepository, SqliteUnitOfWork, Store,
};

/// Factory for repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// A store over `pool` with a fresh round-trip counter.
    pub fn store(pool: SqlitePool, timeout: Duration) -> Store {
        Store::new(pool, timeout, RoundTrips::new())
    }

    /// Build all `SQLite` repositories over one shared [`Store`].
    ///
    /// The returned `Repos` carries the store's round-trip counter, so the
    /// services observe every statement any repository issues.
    pub fn build_repos(pool: SqlitePool, timeout: Duration) -> Repos {
        Self::repos_for(&Self::store(pool, timeout))
    }

    /// Build a complete `RosterCore` in one step.
    ///
    /// ```ignore
    /// use roster_db::{CoreFactory, setup_database};
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let core = CoreFactory::build_core(pool, Duration::from_secs(5));
    /// ```
    pub fn build_core(pool: SqlitePool, timeout: Duration) -> RosterCore {
        RosterCore::new(Self::build_repos(pool, timeout))
    }

    /// Wrap an existing store's repositories into `Repos`.
    pub fn repos_for(store: &Store) -> Repos {
        Repos::new(
            Arc::new(SqliteMemberRepository::new(store.clone())),
            Arc::new(SqliteTeamRepository::new(store.clone())),
            Arc::new(SqliteQueryExecutor::new(store.clone())),
            Arc::new(SqliteUnitOfWork::new(store.clone())),
            store.round_trips().clone(),
        )
    }
}

/// In-memory database with the schema applied, for tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    store: Store,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Empty database with the production schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self {
            store: CoreFactory::store(pool, crate::repositories::DEFAULT_STORE_TIMEOUT),
        })
    }

    /// Database holding the sample roster.
    pub async fn seeded() -> anyhow::Result<Self> {
        let db = Self::new().await?;
        crate::seed::seed_sample_data(&db.store).await?;
        Ok(db)
    }

    /// Same database, with a different per-call timeout and a fresh counter.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            store: Store::new(self.store.pool().clone(), timeout, RoundTrips::new()),
        }
    }

    pub const fn pool(&self) -> &SqlitePool {
        self.store.pool()
    }

    pub const fn store(&self) -> &Store {
        &self.store
    }

    pub const fn round_trips(&self) -> &RoundTrips {
        self.store.round_trips()
    }

    pub fn member_repository(&self) -> SqliteMemberRepository {
        SqliteMemberRepository::new(self.store.clone())
    }

    pub fn team_repository(&self) -> SqliteTeamRepository {
        SqliteTeamRepository::new(self.store.clone())
    }

    pub fn query_executor(&self) -> SqliteQueryExecutor {
        SqliteQueryExecutor::new(self.store.clone())
    }

    pub fn unit_of_work(&self) -> SqliteUnitOfWork {
        SqliteUnitOfWork::new(self.store.clone())
    }

    pub fn repos(&self) -> Repos {
        CoreFactory::repos_for(&self.store)
    }

    pub fn core(&self) -> RosterCore {
        RosterCore::new(self.repos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{FetchMode, MemberRepository, RepositoryError};

    #[tokio::test]
    async fn repos_share_one_counter() {
        let db = TestDb::seeded().await.unwrap();
        let repos = db.repos();
        let start = repos.round_trips.count();

        repos.members.list(FetchMode::Shallow).await.unwrap();
        repos.teams.list().await.unwrap();

        assert_eq!(repos.round_trips.since(start), 2);
        assert_eq!(db.round_trips().count(), repos.round_trips.count());
    }

    #[tokio::test]
    async fn core_serves_fetch_join_in_one_round_trip() {
        let db = TestDb::seeded().await.unwrap();
        let core = db.core();
        let start = core.round_trips().count();

        let views = core.members().all_members_fetch_join().await.unwrap();

        assert_eq!(views.len(), 4);
        assert_eq!(core.round_trips().since(start), 1);
    }

    #[tokio::test]
    async fn lazy_listing_holds_one_connection_for_the_whole_request() {
        let db = TestDb::seeded().await.unwrap();
        // The test pool has one connection: a statement that bypassed the
        // open session would wait for it and time out.
        let core = db.with_timeout(Duration::from_millis(200)).core();

        let views = core.members().all_members_lazy().await.unwrap();
        assert_eq!(views.len(), 4);
        assert_eq!(core.round_trips().count(), 3);
    }

    #[tokio::test]
    async fn failed_team_delete_leaves_the_team_in_place() {
        let db = TestDb::seeded().await.unwrap();
        let core = db.core();

        let err = core.teams().remove(1).await.unwrap_err();
        assert!(matches!(
            err,
            roster_core::CoreError::Repository(RepositoryError::Constraint(_))
        ));
        assert_eq!(core.teams().get(1).await.unwrap().map(|t| t.name), Some("teamA".to_string()));

        let renamed = core.teams().rename(2, "teamC").await.unwrap();
        assert_eq!(renamed.name, "teamC");
        assert_eq!(core.teams().get(2).await.unwrap(), Some(renamed));
    }

    #[tokio::test]
    async fn store_call_times_out_while_pool_is_busy() {
        let db = TestDb::new().await.unwrap();
        let slow = db.with_timeout(Duration::from_millis(50));

        // The test pool has one connection; holding it starves the next call.
        let _held = db.pool().acquire().await.unwrap();
        let err = slow
            .member_repository()
            .list(FetchMode::Shallow)
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Timeout(d) if d == Duration::from_millis(50)));
    }
}
