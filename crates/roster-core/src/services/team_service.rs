//! Team service - thin facade over the team repository.

use std::sync::Arc;

use crate::domain::{NewTeam, Team};
use crate::ports::{CoreError, RepositoryError, TeamRepository, UnitOfWork};

pub struct TeamService {
    repo: Arc<dyn TeamRepository>,
    sessions: Arc<dyn UnitOfWork>,
}

impl TeamService {
    pub fn new(repo: Arc<dyn TeamRepository>, sessions: Arc<dyn UnitOfWork>) -> Self {
        Self { repo, sessions }
    }

    pub async fn list(&self) -> Result<Vec<Team>, CoreError> {
        self.repo.list().await.map_err(CoreError::from)
    }

    /// Get a team by ID, `None` if it doesn't exist.
    pub async fn get(&self, id: i64) -> Result<Option<Team>, CoreError> {
        match self.repo.get_by_id(id).await {
            Ok(team) => Ok(Some(team)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(CoreError::from(e)),
        }
    }

    pub async fn add(&self, team: NewTeam) -> Result<Team, CoreError> {
        if team.name.trim().is_empty() {
            return Err(CoreError::Validation("team name must not be blank".to_string()));
        }
        self.repo.insert(&team).await.map_err(CoreError::from)
    }

    /// Rename a team. The read and the update share one transaction.
    pub async fn rename(&self, id: i64, name: &str) -> Result<Team, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("team name must not be blank".to_string()));
        }
        let session = self.sessions.begin().await?;
        let outcome = async {
            let mut team = session.teams.get_by_id(id).await?;
            name.clone_into(&mut team.name);
            session.teams.update(&team).await?;
            Ok::<_, CoreError>(team)
        }
        .await;
        session.finish(outcome).await
    }

    /// Remove a team by ID. Fails while members still belong to it.
    pub async fn remove(&self, id: i64) -> Result<Team, CoreError> {
        let session = self.sessions.begin().await?;
        let outcome = async {
            let team = session.teams.get_by_id(id).await?;
            session.teams.delete(id).await?;
            Ok::<_, CoreError>(team)
        }
        .await;
        session.finish(outcome).await
    }
}
