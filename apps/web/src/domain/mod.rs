// Domain layer module exports
// Pure types and rules; no I/O happens here

pub mod gateways;
pub mod participant;
pub mod results;
pub mod team;
pub mod validation;
