//! Data Transfer Objects (DTOs) for the HTTP API contract.
//!
//! These types fix the JSON field names independently of the domain types.

pub mod members;

pub use members::{
    FetchQuery, MemberDto, MemberPageDto, MemberSearchQuery, MemberTeamDto, NewMemberRequest,
    NewTeamRequest, RenameTeamRequest, StatsDto, TeamDto, UpdateMemberRequest,
};
