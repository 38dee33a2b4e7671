//! `SQLite` implementation of the `MemberRepository` trait.

use async_trait::async_trait;

use roster_core::{FetchMode, Member, MemberRepository, NewMember, RepositoryError};

use super::row_mappers::{MEMBER_COLUMNS, MEMBER_TEAM_COLUMNS, row_to_member, row_to_member_with_team};
use super::store::Store;

const FROM_MEMBER: &str = "FROM member m";
const FROM_MEMBER_WITH_TEAM: &str = "FROM member m LEFT JOIN team t ON t.id = m.team_id";

fn select_for(mode: FetchMode) -> String {
    match mode {
        FetchMode::Shallow => format!("SELECT {MEMBER_COLUMNS} {FROM_MEMBER}"),
        FetchMode::Deep => format!("SELECT {MEMBER_TEAM_COLUMNS} {FROM_MEMBER_WITH_TEAM}"),
    }
}

/// `SQLite` implementation of the `MemberRepository` trait.
pub struct SqliteMemberRepository {
    store: Store,
}

impl SqliteMemberRepository {
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn list(&self, mode: FetchMode) -> Result<Vec<Member>, RepositoryError> {
        let query = format!("{} ORDER BY m.id", select_for(mode));

        let mut conn = self.store.connection().await?;
        let rows = self
            .store
            .run("member.list", sqlx::query(&query).fetch_all(&mut *conn))
            .await?;

        match mode {
            FetchMode::Shallow => rows.iter().map(row_to_member).collect(),
            FetchMode::Deep => rows.iter().map(row_to_member_with_team).collect(),
        }
    }

    async fn get_by_id(&self, id: i64, mode: FetchMode) -> Result<Member, RepositoryError> {
        let query = format!("{} WHERE m.id = ?", select_for(mode));

        let mut conn = self.store.connection().await?;
        let row = self
            .store
            .run(
                "member.get_by_id",
                sqlx::query(&query).bind(id).fetch_optional(&mut *conn),
            )
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Member with ID {id}")))?;

        match mode {
            FetchMode::Shallow => row_to_member(&row),
            FetchMode::Deep => row_to_member_with_team(&row),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, RepositoryError> {
        let query = format!(
            "{} WHERE m.username = ? ORDER BY m.id",
            select_for(FetchMode::Shallow)
        );

        let mut conn = self.store.connection().await?;
        let rows = self
            .store
            .run(
                "member.find_by_username",
                sqlx::query(&query).bind(username).fetch_all(&mut *conn),
            )
            .await?;

        match rows.as_slice() {
            [] => Ok(None),
            [row] => row_to_member(row).map(Some),
            _ => Err(RepositoryError::NonUnique {
                what: format!("username '{username}'"),
                found: rows.len() as u64,
            }),
        }
    }

    async fn insert(&self, member: &NewMember) -> Result<Member, RepositoryError> {
        let mut conn = self.store.connection().await?;
        let row = self
            .store
            .run(
                "member.insert",
                sqlx::query(
                    "INSERT INTO member (username, age, team_id) VALUES (?, ?, ?) \
                     RETURNING id, username, age, team_id",
                )
                .bind(&member.username)
                .bind(member.age)
                .bind(member.team_id)
                .fetch_one(&mut *conn),
            )
            .await?;

        row_to_member(&row)
    }

    async fn update(&self, member: &Member) -> Result<(), RepositoryError> {
        let mut conn = self.store.connection().await?;
        let result = self
            .store
            .run(
                "member.update",
                sqlx::query("UPDATE member SET username = ?, age = ?, team_id = ? WHERE id = ?")
                    .bind(&member.username)
                    .bind(member.age)
                    .bind(member.team_id())
                    .bind(member.id)
                    .execute(&mut *conn),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Member with ID {}",
                member.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.store.connection().await?;
        let result = self
            .store
            .run(
                "member.delete",
                sqlx::query("DELETE FROM member WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Member with ID {id}")));
        }
        Ok(())
    }
}
