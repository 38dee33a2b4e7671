//! HTTP request handlers.
//!
//! Handlers are thin wrappers that delegate to `RosterCore`.

pub mod all_members;
pub mod members;
pub mod teams;
