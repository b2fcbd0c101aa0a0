use serde::{Deserialize, Serialize};

/// Progress of a registration submission against the backend
///
/// # Status Transitions
/// ```text
/// Pending -> TeamCreated -> ParticipantsRegistered -> DocumentUploaded -> Complete
///   |             |                  |
///   v             +----> RolledBack <+
/// Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing has been sent yet
    #[default]
    Pending,
    /// The remote team exists
    TeamCreated,
    /// All three participants are registered
    ParticipantsRegistered,
    /// The team document is stored
    DocumentUploaded,
    /// Registration finished successfully
    Complete,
    /// Team creation failed; there is nothing to undo
    Failed,
    /// A later step failed and the team deletion was issued
    RolledBack,
}

impl SubmissionState {
    /// Checks if a transition from current state to next state is valid
    ///
    /// # Valid Transitions
    /// - Pending -> TeamCreated
    /// - Pending -> Failed
    /// - TeamCreated -> ParticipantsRegistered
    /// - TeamCreated -> RolledBack
    /// - ParticipantsRegistered -> DocumentUploaded
    /// - ParticipantsRegistered -> RolledBack
    /// - DocumentUploaded -> Complete
    ///
    /// # Example
    /// ```
    /// use triatlon_web::registration::state::SubmissionState;
    ///
    /// assert!(SubmissionState::Pending.can_transition_to(SubmissionState::TeamCreated));
    /// assert!(!SubmissionState::Pending.can_transition_to(SubmissionState::RolledBack));
    /// ```
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Pending, TeamCreated)
                | (Pending, Failed)
                | (TeamCreated, ParticipantsRegistered)
                | (TeamCreated, RolledBack)
                | (ParticipantsRegistered, DocumentUploaded)
                | (ParticipantsRegistered, RolledBack)
                | (DocumentUploaded, Complete)
        )
    }

    /// Whether a remote team may exist that a failure must delete
    pub fn needs_compensation(&self) -> bool {
        matches!(
            self,
            SubmissionState::TeamCreated | SubmissionState::ParticipantsRegistered
        )
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionState::Pending => write!(f, "pending"),
            SubmissionState::TeamCreated => write!(f, "team_created"),
            SubmissionState::ParticipantsRegistered => write!(f, "participants_registered"),
            SubmissionState::DocumentUploaded => write!(f, "document_uploaded"),
            SubmissionState::Complete => write!(f, "complete"),
            SubmissionState::Failed => write!(f, "failed"),
            SubmissionState::RolledBack => write!(f, "rolled_back"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubmissionState::*;

    #[test]
    fn happy_path_is_valid() {
        assert!(Pending.can_transition_to(TeamCreated));
        assert!(TeamCreated.can_transition_to(ParticipantsRegistered));
        assert!(ParticipantsRegistered.can_transition_to(DocumentUploaded));
        assert!(DocumentUploaded.can_transition_to(Complete));
    }

    #[test]
    fn rollback_only_after_team_exists() {
        assert!(TeamCreated.can_transition_to(RolledBack));
        assert!(ParticipantsRegistered.can_transition_to(RolledBack));
        assert!(!Pending.can_transition_to(RolledBack));
        assert!(!DocumentUploaded.can_transition_to(RolledBack));
    }

    #[test]
    fn failed_only_from_pending() {
        assert!(Pending.can_transition_to(Failed));
        assert!(!TeamCreated.can_transition_to(Failed));
    }

    #[test]
    fn steps_cannot_be_skipped() {
        assert!(!Pending.can_transition_to(ParticipantsRegistered));
        assert!(!TeamCreated.can_transition_to(DocumentUploaded));
        assert!(!ParticipantsRegistered.can_transition_to(Complete));
    }

    #[test]
    fn terminal_states_go_nowhere() {
        for terminal in [Complete, Failed, RolledBack] {
            for next in [Pending, TeamCreated, ParticipantsRegistered, DocumentUploaded, Complete] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn compensation_needed_while_team_is_partial() {
        assert!(!Pending.needs_compensation());
        assert!(TeamCreated.needs_compensation());
        assert!(ParticipantsRegistered.needs_compensation());
        assert!(!Complete.needs_compensation());
    }

    #[test]
    fn state_display() {
        assert_eq!(Pending.to_string(), "pending");
        assert_eq!(ParticipantsRegistered.to_string(), "participants_registered");
        assert_eq!(RolledBack.to_string(), "rolled_back");
    }
}
