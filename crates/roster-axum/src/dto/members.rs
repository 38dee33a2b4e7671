//! Member and team DTOs.

use roster_core::query::{MemberQuery, QueryResults, member, team};
use roster_core::{
    AgeSummary, FetchMode, Member, MemberTeamView, NewMember, Team, TeamAverage, TeamRef,
};
use serde::{Deserialize, Serialize};

/// Member name plus team name, as served by `/all-members` and `/all-members2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_name: Option<String>,
    pub team_name: Option<String>,
}

impl From<MemberTeamView> for MemberTeamDto {
    fn from(view: MemberTeamView) -> Self {
        Self {
            member_name: view.member_name,
            team_name: view.team_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDto {
    pub id: i64,
    pub name: String,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
        }
    }
}

/// A member row. `team` is only present when the read loaded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamDto>,
}

impl From<Member> for MemberDto {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            team_id: member.team_id(),
            team: member.team.loaded().cloned().map(TeamDto::from),
            username: member.username,
            age: member.age,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemberRequest {
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl From<NewMemberRequest> for NewMember {
    fn from(req: NewMemberRequest) -> Self {
        Self {
            username: req.username,
            age: req.age,
            team_id: req.team_id,
        }
    }
}

/// Full replacement of a member's fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl UpdateMemberRequest {
    pub fn into_member(self, id: i64) -> Member {
        Member {
            id,
            username: self.username,
            age: self.age,
            team: TeamRef::from(self.team_id),
        }
    }
}

/// Optional filters and paging for member search.
///
/// Absent filters are ignored. Results are ordered by id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchQuery {
    pub username: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub team_name: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl MemberSearchQuery {
    pub fn to_query(&self) -> MemberQuery {
        let m = member();
        let mut query = MemberQuery::new()
            .where_all([
                self.username.as_deref().map(|u| m.username().eq(u)),
                self.min_age.map(|age| m.age().goe(age)),
                self.max_age.map(|age| m.age().loe(age)),
                self.team_name.as_deref().map(|name| team().name().eq(name)),
            ])
            .order_by(m.id().asc());
        if self.team_name.is_some() {
            query = query.join_team();
        }
        if let Some(offset) = self.offset {
            query = query.offset(offset);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
    }
}

/// One page of members plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberPageDto {
    pub results: Vec<MemberDto>,
    pub total: u64,
    pub offset: u64,
    pub limit: Option<u64>,
}

impl From<QueryResults<Member>> for MemberPageDto {
    fn from(page: QueryResults<Member>) -> Self {
        let page = page.map(MemberDto::from);
        Self {
            results: page.results,
            total: page.total,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeamRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenameTeamRequest {
    pub name: String,
}

/// `?fetch=shallow|deep`, shallow when absent.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FetchQuery {
    #[serde(default)]
    pub fetch: FetchMode,
}

/// Age aggregates over all members plus per-team averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub count: u64,
    pub sum: Option<i64>,
    pub average: Option<f64>,
    pub max: Option<i64>,
    pub min: Option<i64>,
    pub teams: Vec<TeamAverageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAverageDto {
    pub team_name: String,
    pub average_age: f64,
}

impl StatsDto {
    pub fn new(summary: AgeSummary, teams: Vec<TeamAverage>) -> Self {
        Self {
            count: summary.count,
            sum: summary.sum,
            average: summary.average,
            max: summary.max,
            min: summary.min,
            teams: teams
                .into_iter()
                .map(|t| TeamAverageDto {
                    team_name: t.team_name,
                    average_age: t.average_age,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::TeamRef;

    #[test]
    fn member_team_dto_is_the_wire_form_of_the_view() {
        let dto = MemberTeamDto::from(MemberTeamView {
            member_name: Some("member1".into()),
            team_name: None,
        });
        assert_eq!(
            serde_json::to_string(&dto).unwrap(),
            r#"{"memberName":"member1","teamName":null}"#
        );
    }

    #[test]
    fn search_query_joins_the_team_only_when_filtering_on_it() {
        let plain = MemberSearchQuery {
            min_age: Some(15),
            limit: Some(2),
            ..MemberSearchQuery::default()
        }
        .to_query();
        assert_eq!(plain.shape().predicates.len(), 1);
        assert_eq!(plain.shape().join, None);
        assert_eq!((plain.shape().offset, plain.shape().limit), (None, Some(2)));

        let by_team = MemberSearchQuery {
            team_name: Some("teamB".into()),
            ..MemberSearchQuery::default()
        }
        .to_query();
        assert!(by_team.shape().join.is_some());
        assert!(by_team.validate().is_ok());
    }

    #[test]
    fn member_dto_includes_team_only_when_loaded() {
        let team = Team {
            id: 1,
            name: "teamA".into(),
        };
        let shallow = MemberDto::from(Member {
            id: 1,
            username: Some("member1".into()),
            age: 10,
            team: TeamRef::Id(1),
        });
        let deep = MemberDto::from(Member {
            id: 1,
            username: Some("member1".into()),
            age: 10,
            team: TeamRef::Loaded(team),
        });

        let shallow_json = serde_json::to_value(&shallow).unwrap();
        assert_eq!(shallow_json["teamId"], 1);
        assert!(shallow_json.get("team").is_none());

        let deep_json = serde_json::to_value(&deep).unwrap();
        assert_eq!(deep_json["team"]["name"], "teamA");
    }
}
