//! `SQLite` implementation of the `TeamRepository` trait.

use async_trait::async_trait;

use roster_core::{NewTeam, RepositoryError, Team, TeamRepository};

use super::row_mappers::{TEAM_COLUMNS, row_to_team};
use super::store::Store;

pub struct SqliteTeamRepository {
    store: Store,
}

impl SqliteTeamRepository {
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn list(&self) -> Result<Vec<Team>, RepositoryError> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM team ORDER BY id");

        let mut conn = self.store.connection().await?;
        let rows = self
            .store
            .run("team.list", sqlx::query(&query).fetch_all(&mut *conn))
            .await?;

        rows.iter().map(row_to_team).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Team, RepositoryError> {
        let query = format!("SELECT {TEAM_COLUMNS} FROM team WHERE id = ?");

        let mut conn = self.store.connection().await?;
        let row = self
            .store
            .run(
                "team.get_by_id",
                sqlx::query(&query).bind(id).fetch_optional(&mut *conn),
            )
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Team with ID {id}")))?;

        row_to_team(&row)
    }

    async fn insert(&self, team: &NewTeam) -> Result<Team, RepositoryError> {
        let query = format!("INSERT INTO team (name) VALUES (?) RETURNING {TEAM_COLUMNS}");

        let mut conn = self.store.connection().await?;
        let row = self
            .store
            .run(
                "team.insert",
                sqlx::query(&query).bind(&team.name).fetch_one(&mut *conn),
            )
            .await?;

        row_to_team(&row)
    }

    async fn update(&self, team: &Team) -> Result<(), RepositoryError> {
        let mut conn = self.store.connection().await?;
        let result = self
            .store
            .run(
                "team.update",
                sqlx::query("UPDATE team SET name = ? WHERE id = ?")
                    .bind(&team.name)
                    .bind(team.id)
                    .execute(&mut *conn),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Team with ID {}", team.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.store.connection().await?;
        let result = self
            .store
            .run(
                "team.delete",
                sqlx::query("DELETE FROM team WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Team with ID {id}")));
        }
        Ok(())
    }
}
