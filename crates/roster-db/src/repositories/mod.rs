//! Repository implementations using `SQLite`.
//!
//! All SQL lives in this module. The `SqlitePool` is held by [`Store`] and
//! never appears in the port trait signatures. [`SqliteUnitOfWork`] hands
//! out repositories bound to one transaction.

mod row_mappers;
mod sql;
mod sqlite_member_repository;
mod sqlite_query_executor;
mod sqlite_team_repository;
mod sqlite_unit_of_work;
mod store;

pub use sqlite_member_repository::SqliteMemberRepository;
pub use sqlite_query_executor::SqliteQueryExecutor;
pub use sqlite_team_repository::SqliteTeamRepository;
pub use sqlite_unit_of_work::SqliteUnitOfWork;
pub use store::{DEFAULT_STORE_TIMEOUT, Store};
