//! `RosterCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, Web)
//! receive a `RosterCore` instance and use it to access all functionality.

use crate::ports::{Repos, RoundTrips};

use super::{MemberService, TeamService};

/// The core application facade.
///
/// ```ignore
/// let repos = CoreFactory::build_repos(pool, Duration::from_secs(5));
/// let core = RosterCore::new(repos);
///
/// let views = core.members().all_members_fetch_join().await?;
/// ```
pub struct RosterCore {
    members: MemberService,
    teams: TeamService,
    round_trips: RoundTrips,
}

impl RosterCore {
    pub fn new(repos: Repos) -> Self {
        Self {
            members: MemberService::new(
                repos.members,
                repos.queries,
                repos.sessions.clone(),
                repos.round_trips.clone(),
            ),
            teams: TeamService::new(repos.teams, repos.sessions),
            round_trips: repos.round_trips,
        }
    }

    pub const fn members(&self) -> &MemberService {
        &self.members
    }

    pub const fn teams(&self) -> &TeamService {
        &self.teams
    }

    /// Statements executed against the store since startup.
    pub const fn round_trips(&self) -> &RoundTrips {
        &self.round_trips
    }
}
