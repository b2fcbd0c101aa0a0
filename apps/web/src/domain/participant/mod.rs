// Participant domain module
// Form drafts, normalized backend payloads and the fixed enumerations

#![allow(clippy::module_inception)]

pub mod participant;
pub mod value_objects;

pub use participant::{NewParticipant, ParticipantDraft, ParticipantRecord};
pub use value_objects::{Campus, Discipline, Gender, Role};
