// Gateway traits (ports) to the event backend
// Implementations live in the infrastructure layer

pub mod errors;
pub mod event_gateway;
pub mod registration_gateway;
pub mod session_gateway;

pub use errors::{GatewayError, GatewayErrorKind, GatewayResult};
pub use event_gateway::{EventGateway, ResultsVisibility};
pub use registration_gateway::RegistrationGateway;
pub use session_gateway::{LoginResponse, SessionGateway, User};
