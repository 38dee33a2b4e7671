//! Table formatting for CLI output.

use std::fmt::Write;

use roster_core::{AgeSummary, Member, Team, TeamAverage, TeamRef};

/// Truncates a string to a maximum number of characters, adding "..." if needed.
///
/// ```rust
/// use roster_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Members as a table. The team column shows the name when the read loaded
/// it and the bare id otherwise.
pub fn members_table(members: &[Member]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<5} {:<20} {:<5} Team", "ID", "Username", "Age");
    let _ = writeln!(out, "{}", separator(45));

    for member in members {
        let team = match &member.team {
            TeamRef::None => "--".to_string(),
            TeamRef::Id(id) => format!("#{id}"),
            TeamRef::Loaded(team) => truncate_string(&team.name, 20),
        };
        let username = format_optional(member.username.as_ref(), "--");
        let _ = writeln!(
            out,
            "{:<5} {:<20} {:<5} {}",
            member.id,
            truncate_string(&username, 20),
            member.age,
            team
        );
    }
    out
}

pub fn teams_table(teams: &[Team]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<5} Name", "ID");
    let _ = writeln!(out, "{}", separator(30));
    for team in teams {
        let _ = writeln!(out, "{:<5} {}", team.id, team.name);
    }
    out
}

pub fn stats_table(summary: &AgeSummary, teams: &[TeamAverage]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Members: {}", summary.count);
    let _ = writeln!(out, "Sum:     {}", format_optional(summary.sum.as_ref(), "--"));
    let _ = writeln!(
        out,
        "Average: {}",
        summary.average.map_or_else(|| "--".to_string(), |a| format!("{a:.1}"))
    );
    let _ = writeln!(out, "Max:     {}", format_optional(summary.max.as_ref(), "--"));
    let _ = writeln!(out, "Min:     {}", format_optional(summary.min.as_ref(), "--"));

    if !teams.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<20} Average age", "Team");
        let _ = writeln!(out, "{}", separator(32));
        for team in teams {
            let _ = writeln!(
                out,
                "{:<20} {:.1}",
                truncate_string(&team.team_name, 20),
                team.average_age
            );
        }
    }
    out
}
