//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, HTTP, etc.).
//!
//! # Structure
//!
//! - `member` - Member types (`Member`, `NewMember`, `TeamRef`, `FetchMode`)
//! - `team` - Team types (`Team`, `NewTeam`)
//! - `projection` - Flat read views combining both (`MemberTeamView`)
//! - `sample` - The sample roster used by `seed` and the test suites

mod member;
mod projection;
mod sample;
mod team;

pub use member::{FetchMode, Member, NewMember, TeamRef};
pub use projection::MemberTeamView;
pub use sample::{SAMPLE_MEMBERS, SAMPLE_TEAMS, SampleMember};
pub use team::{NewTeam, Team};
