//! Typed query execution port.
//!
//! The store adapter renders [`MemberQuery`] and [`TupleQuery`] values to
//! its own dialect. Queries are validated before they are rendered; a
//! validation failure surfaces as [`RepositoryError::InvalidQuery`].

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Member;
use crate::query::{MemberQuery, QueryResults, Tuple, TupleQuery};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberQueryExecutor: Send + Sync {
    /// All members matching the query.
    ///
    /// Team relationship is loaded when the query uses `fetch_join`,
    /// otherwise it is returned as a foreign key.
    async fn fetch(&self, query: &MemberQuery) -> Result<Vec<Member>, RepositoryError>;

    /// Number of members matching the query, ignoring ordering and paging.
    async fn fetch_count(&self, query: &MemberQuery) -> Result<u64, RepositoryError>;

    /// Rows of a projection or aggregate query.
    async fn fetch_tuples(&self, query: &TupleQuery) -> Result<Vec<Tuple>, RepositoryError>;

    /// The single matching member.
    ///
    /// Returns `Ok(None)` on no match and `Err(RepositoryError::NonUnique)`
    /// when several members match.
    async fn fetch_one(&self, query: &MemberQuery) -> Result<Option<Member>, RepositoryError> {
        let mut rows = self.fetch(query).await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            found => Err(RepositoryError::NonUnique {
                what: "member query".to_string(),
                found: found as u64,
            }),
        }
    }

    /// The first matching member in query order.
    async fn fetch_first(&self, query: &MemberQuery) -> Result<Option<Member>, RepositoryError> {
        let limited = query.clone().limit(1);
        Ok(self.fetch(&limited).await?.into_iter().next())
    }

    /// One page of members plus the unpaged total.
    async fn fetch_page(
        &self,
        query: &MemberQuery,
    ) -> Result<QueryResults<Member>, RepositoryError> {
        let total = self.fetch_count(query).await?;
        let results = self.fetch(query).await?;
        Ok(QueryResults {
            results,
            total,
            offset: query.shape().offset.unwrap_or(0),
            limit: query.shape().limit,
        })
    }
}
