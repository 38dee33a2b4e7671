#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod query;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    FetchMode, Member, MemberTeamView, NewMember, NewTeam, SAMPLE_MEMBERS, SAMPLE_TEAMS,
    SampleMember, Team, TeamRef,
};
pub use ports::{
    CoreError, MemberQueryExecutor, MemberRepository, Repos, RepositoryError, RoundTrips, Session,
    SessionHandle, TeamRepository, UnitOfWork,
};
pub use query::{
    Aggregate, CaseExpr, MemberQuery, OrderSpecifier, Predicate, Projection, QueryError,
    QueryResults, SubQuery, Tuple, TupleQuery, Value, member, team,
};
pub use services::{AgeSummary, MemberService, RosterCore, TeamAverage, TeamService};

// Re-export path utilities
pub use paths::{PathError, data_root, database_path, resolve_database_path};
