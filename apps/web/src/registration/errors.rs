use thiserror::Error;

use super::events::SubmissionEvent;
use super::state::SubmissionState;
use crate::domain::gateways::{GatewayError, GatewayErrorKind};

/// Errors that can stop a registration submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("team could not be created: {0}")]
    TeamCreation(GatewayError),

    #[error("participant {index} could not be registered: {source}")]
    ParticipantRegistration { index: usize, source: GatewayError },

    #[error("team document could not be uploaded: {0}")]
    DocumentUpload(GatewayError),

    #[error("invalid submission transition from {from} to {to}")]
    InvalidStateTransition {
        from: SubmissionState,
        to: SubmissionState,
    },
}

impl SubmissionError {
    /// Kind of the underlying backend failure, if there was one
    pub fn gateway_kind(&self) -> Option<GatewayErrorKind> {
        match self {
            SubmissionError::TeamCreation(e)
            | SubmissionError::ParticipantRegistration { source: e, .. }
            | SubmissionError::DocumentUpload(e) => Some(e.kind),
            SubmissionError::InvalidStateTransition { .. } => None,
        }
    }
}

/// A submission that did not complete
///
/// Carries the state it stopped in and the events recorded before that.
#[derive(Debug, Clone, Error)]
#[error("{error} (stopped in {state})")]
pub struct SubmissionFailure {
    #[source]
    pub error: SubmissionError,
    pub state: SubmissionState,
    pub events: Vec<SubmissionEvent>,
}

impl SubmissionFailure {
    /// Whether the compensating team deletion went through
    pub fn team_deleted(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SubmissionEvent::TeamDeleted { .. }))
    }

    /// Team left behind because its compensating deletion failed
    pub fn orphaned_team(&self) -> Option<&str> {
        self.events
            .iter()
            .find(|e| matches!(e, SubmissionEvent::CompensationFailed { .. }))
            .map(SubmissionEvent::team_id)
    }
}

pub type SubmissionResult<T> = Result<T, SubmissionFailure>;
