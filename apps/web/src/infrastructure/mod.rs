// Infrastructure layer module
// Contains adapters to the event backend
// Follows Hexagonal Architecture

pub mod http;
