//! Transactional loading of the sample roster.

use std::collections::HashMap;

use roster_core::{RepositoryError, SAMPLE_MEMBERS, SAMPLE_TEAMS};
use tracing::{info, warn};

use crate::repositories::Store;

/// What [`seed_sample_data`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { teams: usize, members: usize },
    /// Teams already exist; nothing was written.
    AlreadyPresent,
}

/// Insert the sample teams and members in a single transaction.
///
/// Skips when any team exists. A failure part way rolls the whole
/// transaction back, so either all sample rows are written or none are.
pub async fn seed_sample_data(store: &Store) -> Result<SeedOutcome, RepositoryError> {
    let session = store.begin().await?;
    match seed_within(&session).await {
        Ok(outcome) => {
            session.commit().await?;
            if let SeedOutcome::Seeded { teams, members } = outcome {
                info!(target: "roster.seed", teams, members, "sample data seeded");
            }
            Ok(outcome)
        }
        Err(err) => {
            if let Err(rollback) = session.rollback().await {
                warn!(target: "roster.seed", error = %rollback, "rollback failed");
            }
            Err(err)
        }
    }
}

async fn seed_within(session: &Store) -> Result<SeedOutcome, RepositoryError> {
    let mut conn = session.connection().await?;

    let existing: i64 = session
        .run(
            "seed.count_teams",
            sqlx::query_scalar("SELECT count(*) FROM team").fetch_one(&mut *conn),
        )
        .await?;
    if existing > 0 {
        info!(target: "roster.seed", existing, "sample data already present");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let mut team_ids = HashMap::with_capacity(SAMPLE_TEAMS.len());
    for name in SAMPLE_TEAMS {
        let id: i64 = session
            .run(
                "seed.team",
                sqlx::query_scalar("INSERT INTO team (name) VALUES (?) RETURNING id")
                    .bind(name)
                    .fetch_one(&mut *conn),
            )
            .await?;
        team_ids.insert(name, id);
    }

    for sample in SAMPLE_MEMBERS {
        let team_id = team_ids.get(sample.team).copied().ok_or_else(|| {
            RepositoryError::Constraint(format!("unknown sample team '{}'", sample.team))
        })?;
        session
            .run(
                "seed.member",
                sqlx::query("INSERT INTO member (username, age, team_id) VALUES (?, ?, ?)")
                    .bind(sample.username)
                    .bind(sample.age)
                    .bind(team_id)
                    .execute(&mut *conn),
            )
            .await?;
    }

    Ok(SeedOutcome::Seeded {
        teams: SAMPLE_TEAMS.len(),
        members: SAMPLE_MEMBERS.len(),
    })
}
