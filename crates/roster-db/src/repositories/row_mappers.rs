//! Row mapping helpers for `SQLite` queries.

use roster_core::query::{Projection, Tuple, Value, ValueKind};
use roster_core::{Member, RepositoryError, Team, TeamRef};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Member columns for a shallow read.
pub const MEMBER_COLUMNS: &str = "m.id, m.username, m.age, m.team_id";

/// Member columns plus the joined team, for a deep read.
pub const MEMBER_TEAM_COLUMNS: &str =
    "m.id, m.username, m.age, m.team_id, t.id AS t_id, t.name AS t_name";

/// Team columns.
pub const TEAM_COLUMNS: &str = "id, name";

fn decode_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Serialization(e.to_string())
}

/// Parse a shallow member row; the team is left as its foreign key.
pub fn row_to_member(row: &SqliteRow) -> Result<Member, RepositoryError> {
    Ok(Member {
        id: row.try_get("id").map_err(decode_err)?,
        username: row.try_get("username").map_err(decode_err)?,
        age: row.try_get("age").map_err(decode_err)?,
        team: TeamRef::from(row.try_get::<Option<i64>, _>("team_id").map_err(decode_err)?),
    })
}

/// Parse a member row that carries the joined team columns.
///
/// A null join (no team) maps to `TeamRef::None`.
pub fn row_to_member_with_team(row: &SqliteRow) -> Result<Member, RepositoryError> {
    let mut member = row_to_member(row)?;
    let team_id: Option<i64> = row.try_get("t_id").map_err(decode_err)?;
    let team_name: Option<String> = row.try_get("t_name").map_err(decode_err)?;

    member.team = match (team_id, team_name) {
        (Some(id), Some(name)) => TeamRef::Loaded(Team { id, name }),
        _ => TeamRef::None,
    };
    Ok(member)
}

/// Parse a team row.
pub fn row_to_team(row: &SqliteRow) -> Result<Team, RepositoryError> {
    Ok(Team {
        id: row.try_get("id").map_err(decode_err)?,
        name: row.try_get("name").map_err(decode_err)?,
    })
}

/// Parse a projection row, one column per projection in select order.
///
/// Values are read by the storage class the projection declares.
pub fn row_to_tuple(row: &SqliteRow, projections: &[Projection]) -> Result<Tuple, RepositoryError> {
    let entries = projections
        .iter()
        .enumerate()
        .map(|(index, projection)| {
            let value = match projection.kind() {
                ValueKind::Integer => row
                    .try_get_unchecked::<Option<i64>, _>(index)
                    .map(Value::from),
                ValueKind::Real => row
                    .try_get_unchecked::<Option<f64>, _>(index)
                    .map(Value::from),
                ValueKind::Text => row
                    .try_get_unchecked::<Option<String>, _>(index)
                    .map(Value::from),
            }
            .map_err(decode_err)?;
            Ok((projection.clone(), value))
        })
        .collect::<Result<Vec<_>, RepositoryError>>()?;

    Ok(Tuple::new(entries))
}
