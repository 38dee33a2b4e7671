//! Database setup and initialization.
//!
//! Entry points call [`setup_database`] with the resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;
use tracing::debug;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// Creates the file (and its parent directory) if it doesn't exist.
/// Foreign keys are enforced on every pooled connection.
///
/// ```rust,no_run
/// use roster_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/tmp/roster.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;
    debug!(target: "roster.store", path = %db_path.display(), "database ready");

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// The pool holds a single connection so every caller sees the same
/// in-memory database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the schema. Safe to call repeatedly.
pub(crate) async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS team (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS member (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT,
            age INTEGER NOT NULL,
            team_id INTEGER REFERENCES team(id)
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_member_username ON member(username)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_member_team_id ON member(team_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn setup_creates_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("roster.db");

        let pool = setup_database(&path).await.unwrap();
        create_schema(&pool).await.unwrap();
        assert!(path.exists());

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('team', 'member') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["member".to_string(), "team".to_string()]);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = setup_test_database().await.unwrap();
        let result = sqlx::query("INSERT INTO member (username, age, team_id) VALUES ('x', 1, 42)")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }
}
