// HTTP adapter for the event backend
// Implements the domain gateway traits with reqwest

pub mod backend_client;
pub mod classify;

pub use backend_client::HttpBackend;
