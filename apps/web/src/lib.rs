//! Triatlon registration web service
//!
//! Backend-for-frontend of the university triathlon site: validates team
//! registrations, sequences them against the event backend with rollback on
//! partial failure, and serves results and admin actions.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod registration;
