// Team domain module
// Registration form model, team document and backend team records

#![allow(clippy::module_inception)]

pub mod document;
pub mod team;

// Re-export main types for convenience
pub use document::TeamDocument;
pub use team::{NewTeam, TeamRecord, TeamRegistration, TeamUpdate, TEAM_SIZE};
