//! Shared statement runner for the `SQLite` repositories.

use std::fmt;
use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use roster_core::{RepositoryError, RoundTrips};
use sqlx::error::ErrorKind;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

type SharedTransaction = Arc<Mutex<Option<Transaction<'static, Sqlite>>>>;

/// Pool, round-trip counter and per-call timeout shared by all repositories.
///
/// Clones share the pool and the counter. A store returned by
/// [`Store::begin`] is bound to one transaction: every statement run through
/// it, or through any clone of it, uses that transaction's connection.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    timeout: Duration,
    round_trips: RoundTrips,
    session: Option<SharedTransaction>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("timeout", &self.timeout)
            .field("round_trips", &self.round_trips)
            .field("in_session", &self.in_session())
            .finish_non_exhaustive()
    }
}

/// A connection to run one statement on.
pub(crate) enum Connection<'a> {
    Pooled(PoolConnection<Sqlite>),
    Session(MappedMutexGuard<'a, SqliteConnection>),
}

impl Deref for Connection<'_> {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        match self {
            Self::Pooled(conn) => &**conn,
            Self::Session(conn) => &**conn,
        }
    }
}

impl DerefMut for Connection<'_> {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        match self {
            Self::Pooled(conn) => &mut **conn,
            Self::Session(conn) => &mut **conn,
        }
    }
}

impl Store {
    pub fn new(pool: SqlitePool, timeout: Duration, round_trips: RoundTrips) -> Self {
        Self {
            pool,
            timeout,
            round_trips,
            session: None,
        }
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub const fn round_trips(&self) -> &RoundTrips {
        &self.round_trips
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether this store is bound to a transaction.
    pub const fn in_session(&self) -> bool {
        self.session.is_some()
    }

    /// Acquire one pooled connection and begin a transaction on it.
    ///
    /// The returned store runs every statement in that transaction until
    /// [`Store::commit`] or [`Store::rollback`]. Dropping the last clone
    /// without either rolls the transaction back and returns the connection
    /// to the pool.
    pub async fn begin(&self) -> Result<Self, RepositoryError> {
        if self.in_session() {
            return Err(RepositoryError::Storage(
                "a session is already open on this store".to_string(),
            ));
        }
        let tx = self.bounded("session.begin", self.pool.begin()).await?;
        debug!(target: "roster.store", "session opened");
        Ok(Self {
            session: Some(Arc::new(Mutex::new(Some(tx)))),
            ..self.clone()
        })
    }

    pub async fn commit(&self) -> Result<(), RepositoryError> {
        let tx = self.take_transaction().await?;
        self.bounded("session.commit", tx.commit()).await?;
        debug!(target: "roster.store", "session committed");
        Ok(())
    }

    pub async fn rollback(&self) -> Result<(), RepositoryError> {
        let tx = self.take_transaction().await?;
        self.bounded("session.rollback", tx.rollback()).await?;
        debug!(target: "roster.store", "session rolled back");
        Ok(())
    }

    async fn take_transaction(&self) -> Result<Transaction<'static, Sqlite>, RepositoryError> {
        let Some(session) = &self.session else {
            return Err(RepositoryError::Storage("no session is open on this store".to_string()));
        };
        session
            .lock()
            .await
            .take()
            .ok_or_else(|| RepositoryError::Storage("session already ended".to_string()))
    }

    /// The connection the next statement runs on.
    ///
    /// Outside a session this acquires a pooled connection, bounded by the
    /// store timeout. Inside one it is the transaction's connection.
    pub(crate) async fn connection(&self) -> Result<Connection<'_>, RepositoryError> {
        match &self.session {
            Some(session) => {
                let guard = session.lock().await;
                MutexGuard::try_map(guard, |tx| tx.as_deref_mut())
                    .map(Connection::Session)
                    .map_err(|_| RepositoryError::Storage("session already ended".to_string()))
            }
            None => self
                .bounded("pool.acquire", self.pool.acquire())
                .await
                .map(Connection::Pooled),
        }
    }

    /// Run one statement, counting it and bounding it by the store timeout.
    pub(crate) async fn run<T, F>(&self, statement: &'static str, fut: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        self.round_trips.record();
        trace!(target: "roster.store", statement, "executing");
        self.bounded(statement, fut).await
    }

    async fn bounded<T, F>(&self, what: &'static str, fut: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(map_sqlx_error),
            Err(_) => {
                warn!(
                    target: "roster.store",
                    what,
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "store call timed out"
                );
                Err(RepositoryError::Timeout(self.timeout))
            }
        }
    }
}

/// Map a driver error onto the storage-agnostic repository error.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::ForeignKeyViolation
            | ErrorKind::UniqueViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => RepositoryError::Constraint(db.message().to_string()),
            _ if db.message().contains("constraint failed") => {
                RepositoryError::Constraint(db.message().to_string())
            }
            _ => RepositoryError::Storage(err.to_string()),
        },
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(err.to_string())
        }
        _ => RepositoryError::Storage(err.to_string()),
    }
}
