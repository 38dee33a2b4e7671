//! The sample roster: two teams and four members.
//!
//! `roster seed` writes exactly this data, and the query tests are written
//! against it.

/// One sample member, referring to its team by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleMember {
    pub username: &'static str,
    pub age: i32,
    pub team: &'static str,
}

pub const SAMPLE_TEAMS: [&str; 2] = ["teamA", "teamB"];

pub const SAMPLE_MEMBERS: [SampleMember; 4] = [
    SampleMember {
        username: "member1",
        age: 10,
        team: "teamA",
    },
    SampleMember {
        username: "member2",
        age: 20,
        team: "teamA",
    },
    SampleMember {
        username: "member3",
        age: 30,
        team: "teamB",
    },
    SampleMember {
        username: "member4",
        age: 40,
        team: "teamB",
    },
];
