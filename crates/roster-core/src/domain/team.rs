//! Team domain types.

use serde::{Deserialize, Serialize};

/// A team that exists in the store with a database ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// Database ID of the team.
    pub id: i64,
    /// Display name of the team.
    pub name: String,
}

/// A team to be inserted into the store (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
