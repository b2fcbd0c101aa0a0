// Team registration workflow
//
// Sequences the backend calls for a validated registration, undoes partial
// work on failure and turns outcomes into user-facing feedback.

pub mod errors;
pub mod events;
pub mod feedback;
pub mod orchestrator;
pub mod state;

// Re-export main types
pub use errors::{SubmissionError, SubmissionFailure};
pub use events::SubmissionEvent;
pub use feedback::{CloseAction, Feedback, FeedbackCategory};
pub use orchestrator::{SubmissionOrchestrator, SubmissionReceipt};
pub use state::SubmissionState;
