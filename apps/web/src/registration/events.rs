use serde::Serialize;

/// Things that happened during one submission, in order
///
/// The event list is returned with both receipts and failures so the exact
/// sequence of backend calls can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SubmissionEvent {
    /// The backend accepted the team
    TeamCreated { team_id: String },
    /// One participant was stored; `index` 0 is the delegate
    ParticipantRegistered { team_id: String, index: usize },
    DocumentUploaded { team_id: String, file_name: String },
    /// Compensating delete succeeded
    TeamDeleted { team_id: String },
    /// Compensating delete failed; the team may be orphaned
    CompensationFailed { team_id: String, reason: String },
    Completed { team_id: String },
}

impl SubmissionEvent {
    pub fn team_id(&self) -> &str {
        match self {
            SubmissionEvent::TeamCreated { team_id }
            | SubmissionEvent::ParticipantRegistered { team_id, .. }
            | SubmissionEvent::DocumentUploaded { team_id, .. }
            | SubmissionEvent::TeamDeleted { team_id }
            | SubmissionEvent::CompensationFailed { team_id, .. }
            | SubmissionEvent::Completed { team_id } => team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_id_of_every_event() {
        let events = vec![
            SubmissionEvent::TeamCreated { team_id: "t".into() },
            SubmissionEvent::ParticipantRegistered { team_id: "t".into(), index: 1 },
            SubmissionEvent::TeamDeleted { team_id: "t".into() },
        ];
        assert!(events.iter().all(|e| e.team_id() == "t"));
    }

    #[test]
    fn serializes_with_tag() {
        let json = serde_json::to_value(SubmissionEvent::TeamDeleted { team_id: "t1".into() }).unwrap();
        assert_eq!(json["event"], "team_deleted");
        assert_eq!(json["team_id"], "t1");
    }
}
