//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod member_service;
mod roster_core;
mod team_service;

pub use member_service::{AgeSummary, MemberService, TeamAverage};
pub use roster_core::RosterCore;
pub use team_service::TeamService;
