//! Member service - member CRUD, team resolution and statistics.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::{FetchMode, Member, MemberTeamView, NewMember, Team, TeamRef};
use crate::ports::{
    CoreError, MemberQueryExecutor, MemberRepository, RepositoryError, RoundTrips, TeamRepository,
    UnitOfWork,
};
use crate::query::{MemberQuery, Projection, QueryResults, TupleQuery, Value, member, team};

/// Aggregate statistics over every member's age.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: u64,
    /// `None` when there are no members.
    pub sum: Option<i64>,
    pub average: Option<f64>,
    pub max: Option<i64>,
    pub min: Option<i64>,
}

/// Average member age of one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAverage {
    pub team_name: String,
    pub average_age: f64,
}

/// Service for member operations.
pub struct MemberService {
    members: Arc<dyn MemberRepository>,
    queries: Arc<dyn MemberQueryExecutor>,
    sessions: Arc<dyn UnitOfWork>,
    round_trips: RoundTrips,
}

fn validate_member(username: Option<&str>, age: i32) -> Result<(), CoreError> {
    if age < 0 {
        return Err(CoreError::Validation(format!(
            "age must not be negative, got {age}"
        )));
    }
    if username.is_some_and(|u| u.trim().is_empty()) {
        return Err(CoreError::Validation(
            "username must not be blank".to_string(),
        ));
    }
    Ok(())
}

impl MemberService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        queries: Arc<dyn MemberQueryExecutor>,
        sessions: Arc<dyn UnitOfWork>,
        round_trips: RoundTrips,
    ) -> Self {
        Self {
            members,
            queries,
            sessions,
            round_trips,
        }
    }

    /// List all members ordered by id.
    pub async fn list(&self, mode: FetchMode) -> Result<Vec<Member>, CoreError> {
        self.members.list(mode).await.map_err(CoreError::from)
    }

    /// Get a member by ID, `None` if it doesn't exist.
    pub async fn get(&self, id: i64, mode: FetchMode) -> Result<Option<Member>, CoreError> {
        match self.members.get_by_id(id, mode).await {
            Ok(member) => Ok(Some(member)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(CoreError::from(e)),
        }
    }

    /// Find the single member with `username`.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Member>, CoreError> {
        self.members
            .find_by_username(username)
            .await
            .map_err(CoreError::from)
    }

    /// Add a new member.
    pub async fn add(&self, member: NewMember) -> Result<Member, CoreError> {
        validate_member(member.username.as_deref(), member.age)?;
        self.members.insert(&member).await.map_err(CoreError::from)
    }

    /// Replace username, age and team of an existing member.
    pub async fn update(&self, member: &Member) -> Result<(), CoreError> {
        validate_member(member.username.as_deref(), member.age)?;
        self.members.update(member).await.map_err(CoreError::from)
    }

    /// Remove a member by ID. Returns the removed member.
    pub async fn remove(&self, id: i64) -> Result<Member, CoreError> {
        let session = self.sessions.begin().await?;
        let outcome = async {
            let member = session.members.get_by_id(id, FetchMode::Shallow).await?;
            session.members.delete(id).await?;
            Ok::<_, CoreError>(member)
        }
        .await;
        session.finish(outcome).await
    }

    /// Pair every member with its team, loading shallow teams one lookup
    /// per distinct team id.
    ///
    /// Teams loaded by the read are reused as they are. Lookups are cached
    /// for this call only.
    pub async fn resolve_teams(
        teams: &dyn TeamRepository,
        members: Vec<Member>,
    ) -> Result<Vec<(Member, Option<Team>)>, CoreError> {
        let mut identity_map: HashMap<i64, Team> = HashMap::new();
        let mut resolved = Vec::with_capacity(members.len());

        for member in members {
            let team = match &member.team {
                TeamRef::None => None,
                TeamRef::Loaded(team) => Some(team.clone()),
                TeamRef::Id(id) => {
                    if let Some(team) = identity_map.get(id) {
                        Some(team.clone())
                    } else {
                        let team = teams.get_by_id(*id).await?;
                        identity_map.insert(*id, team.clone());
                        Some(team)
                    }
                }
            };
            resolved.push((member, team));
        }

        Ok(resolved)
    }

    /// Every member with its team name, resolving teams after a shallow
    /// list.
    ///
    /// Costs one statement for the list plus one per distinct team, all in
    /// one session so the lookups see the same snapshot as the list.
    pub async fn all_members_lazy(&self) -> Result<Vec<MemberTeamView>, CoreError> {
        let start = self.round_trips.count();
        let session = self.sessions.begin().await?;
        let outcome = async {
            let members = session.members.list(FetchMode::Shallow).await?;
            Self::resolve_teams(session.teams.as_ref(), members).await
        }
        .await;
        let views = session
            .finish(outcome)
            .await?
            .iter()
            .map(|(member, team)| MemberTeamView::project(member, team.as_ref()))
            .collect::<Vec<_>>();
        debug!(
            target: "roster.members",
            rows = views.len(),
            round_trips = self.round_trips.since(start),
            "all members via lazy team resolution"
        );
        Ok(views)
    }

    /// Every member with its team name from a single fetch-join statement.
    pub async fn all_members_fetch_join(&self) -> Result<Vec<MemberTeamView>, CoreError> {
        let start = self.round_trips.count();
        let members = self.members.list_with_team().await?;
        let views = members
            .iter()
            .map(|member| {
                MemberTeamView::from_loaded(member).ok_or_else(|| {
                    CoreError::Internal(format!(
                        "member {} came back without its team loaded",
                        member.id
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            target: "roster.members",
            rows = views.len(),
            round_trips = self.round_trips.since(start),
            "all members via fetch join"
        );
        Ok(views)
    }

    /// Members matching a typed query.
    pub async fn search(&self, query: &MemberQuery) -> Result<Vec<Member>, CoreError> {
        self.queries.fetch(query).await.map_err(CoreError::from)
    }

    /// One page of members matching a typed query, with the unpaged total.
    pub async fn page(&self, query: &MemberQuery) -> Result<QueryResults<Member>, CoreError> {
        self.queries.fetch_page(query).await.map_err(CoreError::from)
    }

    /// Count, sum, average, maximum and minimum of member ages.
    pub async fn age_summary(&self) -> Result<AgeSummary, CoreError> {
        let age = member().age();
        let query = TupleQuery::select([age.count(), age.sum(), age.avg(), age.max(), age.min()]);
        let rows = self.queries.fetch_tuples(&query).await?;
        let row = rows
            .first()
            .ok_or_else(|| CoreError::Internal("aggregate query returned no row".to_string()))?;

        let count = row.get(age.count()).and_then(Value::as_i64).unwrap_or(0);
        Ok(AgeSummary {
            count: u64::try_from(count).unwrap_or(0),
            sum: row.get(age.sum()).and_then(Value::as_i64),
            average: row.get(age.avg()).and_then(Value::as_f64),
            max: row.get(age.max()).and_then(Value::as_i64),
            min: row.get(age.min()).and_then(Value::as_i64),
        })
    }

    /// Average member age per team, ordered by team name.
    ///
    /// Teams without members are not listed.
    pub async fn average_age_by_team(&self) -> Result<Vec<TeamAverage>, CoreError> {
        let name = team().name();
        let avg = member().age().avg();
        let query = TupleQuery::select([Projection::from(name), Projection::from(avg)])
            .join_team()
            .group_by(name)
            .order_by(name.asc());

        self.queries
            .fetch_tuples(&query)
            .await?
            .iter()
            .map(|row| {
                let team_name = row.get(name).and_then(Value::as_str);
                let average_age = row.get(avg).and_then(Value::as_f64);
                match (team_name, average_age) {
                    (Some(team_name), Some(average_age)) => Ok(TeamAverage {
                        team_name: team_name.to_string(),
                        average_age,
                    }),
                    _ => Err(CoreError::Internal(format!(
                        "unexpected group row: {row:?}"
                    ))),
                }
            })
            .collect()
    }
}
