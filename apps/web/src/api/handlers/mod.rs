pub mod admin;
pub mod auth;
pub mod registration;
pub mod results;
pub mod teams;
