//! Member repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{FetchMode, Member, NewMember};

/// Repository for member persistence operations.
///
/// Every read states how the team relationship is resolved. A shallow read
/// returns `TeamRef::Id`; a deep read joins the team in the same statement
/// and returns `TeamRef::Loaded` (or `TeamRef::None` for team-less members).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// List all members ordered by id.
    async fn list(&self, mode: FetchMode) -> Result<Vec<Member>, RepositoryError>;

    /// List all members with their team loaded, in one statement.
    ///
    /// Members without a team are included.
    async fn list_with_team(&self) -> Result<Vec<Member>, RepositoryError> {
        self.list(FetchMode::Deep).await
    }

    /// Get a member by its database ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the member doesn't exist.
    async fn get_by_id(&self, id: i64, mode: FetchMode) -> Result<Member, RepositoryError>;

    /// Find the single member with `username`.
    ///
    /// Returns `Ok(None)` when nobody matches and
    /// `Err(RepositoryError::NonUnique)` when several members share it.
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, RepositoryError>;

    /// Insert a new member and return it with its assigned ID.
    ///
    /// Returns `Err(RepositoryError::Constraint)` if `team_id` names no team.
    async fn insert(&self, member: &NewMember) -> Result<Member, RepositoryError>;

    /// Update username, age and team of an existing member.
    async fn update(&self, member: &Member) -> Result<(), RepositoryError>;

    /// Delete a member by its database ID.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
