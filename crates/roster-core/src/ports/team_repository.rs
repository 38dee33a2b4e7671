//! Team repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewTeam, Team};

/// Repository for team persistence operations. CRUD only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// List all teams ordered by id.
    async fn list(&self) -> Result<Vec<Team>, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if the team doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Team, RepositoryError>;

    async fn insert(&self, team: &NewTeam) -> Result<Team, RepositoryError>;

    async fn update(&self, team: &Team) -> Result<(), RepositoryError>;

    /// Delete a team by its database ID.
    ///
    /// Returns `Err(RepositoryError::Constraint)` while members still
    /// reference the team.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
