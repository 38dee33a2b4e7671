//! Member domain types.
//!
//! A member optionally belongs to one team. The relationship is never
//! resolved implicitly: every read states whether it wants the foreign key
//! only ([`FetchMode::Shallow`]) or the joined team ([`FetchMode::Deep`]).

use serde::{Deserialize, Serialize};

use super::team::Team;

/// How a member read resolves the team relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Foreign key only. Reading the team costs an explicit extra lookup.
    #[default]
    Shallow,
    /// Team joined in the same statement.
    Deep,
}

/// The team side of a member row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum TeamRef {
    /// The member has no team.
    #[default]
    None,
    /// Foreign key of a team that was not loaded.
    Id(i64),
    /// Team loaded together with the member.
    Loaded(Team),
}

impl TeamRef {
    /// Team ID regardless of whether the team was loaded.
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::Id(id) => Some(*id),
            Self::Loaded(team) => Some(team.id),
        }
    }

    /// The loaded team, if any.
    pub const fn loaded(&self) -> Option<&Team> {
        match self {
            Self::Loaded(team) => Some(team),
            _ => None,
        }
    }

    /// `true` when the team still has to be fetched before it can be read.
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Id(_))
    }

    /// Drop a loaded team down to its foreign key.
    #[must_use]
    pub fn into_shallow(self) -> Self {
        match self {
            Self::Loaded(team) => Self::Id(team.id),
            other => other,
        }
    }
}

impl From<Option<i64>> for TeamRef {
    fn from(team_id: Option<i64>) -> Self {
        team_id.map_or(Self::None, Self::Id)
    }
}

/// A member that exists in the store with a database ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Database ID of the member.
    pub id: i64,
    /// Username. Not unique, and may be absent.
    pub username: Option<String>,
    /// Age in years.
    pub age: i32,
    /// Team relationship, shallow or loaded depending on the read.
    pub team: TeamRef,
}

impl Member {
    /// Team ID regardless of fetch mode.
    pub const fn team_id(&self) -> Option<i64> {
        self.team.id()
    }
}

/// A member to be inserted into the store (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl NewMember {
    /// A member without a team.
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// A member without a username.
    pub const fn anonymous(age: i32) -> Self {
        Self {
            username: None,
            age,
            team_id: None,
        }
    }

    /// Assign the member to a team.
    #[must_use]
    pub const fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }
}
