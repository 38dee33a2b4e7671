//! Flat read views combining member and team fields.

use super::member::{Member, TeamRef};
use super::team::Team;

/// Member name plus the name of the member's team.
///
/// Recomputed on every read. A member without a team projects to
/// `team_name: None` rather than failing. Adapters own the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTeamView {
    pub member_name: Option<String>,
    pub team_name: Option<String>,
}

impl MemberTeamView {
    /// Project a member together with an already resolved team.
    pub fn project(member: &Member, team: Option<&Team>) -> Self {
        Self {
            member_name: member.username.clone(),
            team_name: team.map(|t| t.name.clone()),
        }
    }

    /// Project a member whose team was loaded by the read.
    ///
    /// Returns `None` when the team is only a foreign key; the caller has to
    /// resolve it first.
    pub fn from_loaded(member: &Member) -> Option<Self> {
        match &member.team {
            TeamRef::Id(_) => None,
            TeamRef::None => Some(Self::project(member, None)),
            TeamRef::Loaded(team) => Some(Self::project(member, Some(team))),
        }
    }
}
