//! Shared CLI presentation utilities.
//!
//! Format-only: renders domain values as text, no domain logic.

pub mod tables;

pub use tables::{format_optional, members_table, stats_table, teams_table, truncate_string};
