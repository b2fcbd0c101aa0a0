use tracing::{debug, error, info, warn};

use super::errors::{SubmissionError, SubmissionFailure, SubmissionResult};
use super::events::SubmissionEvent;
use super::state::SubmissionState;
use crate::domain::gateways::{GatewayError, GatewayErrorKind, RegistrationGateway};
use crate::domain::participant::{NewParticipant, ParticipantRecord};
use crate::domain::team::{NewTeam, TeamRecord, TEAM_SIZE};
use crate::domain::validation::ValidatedRegistration;

/// Outcome of a completed registration
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub team: TeamRecord,
    pub participants: Vec<ParticipantRecord>,
    pub events: Vec<SubmissionEvent>,
}

/// Tracks the state machine and the event log of one submission
#[derive(Debug, Default)]
struct Saga {
    state: SubmissionState,
    events: Vec<SubmissionEvent>,
}

impl Saga {
    fn advance(&mut self, next: SubmissionState) -> Result<(), SubmissionError> {
        if !self.state.can_transition_to(next) {
            return Err(SubmissionError::InvalidStateTransition {
                from: self.state,
                to: next,
            });
        }

        debug!(from = %self.state, to = %next, "submission state change");
        self.state = next;
        Ok(())
    }

    fn record(&mut self, event: SubmissionEvent) {
        self.events.push(event);
    }
}

/// Drives a validated registration through the backend
///
/// Calls run strictly one after another: create the team, register the
/// three participants in form order, upload the document. Any failure after
/// the team exists triggers a best-effort deletion of that team.
pub struct SubmissionOrchestrator<'a, G: RegistrationGateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: RegistrationGateway + ?Sized> SubmissionOrchestrator<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Submits the registration, consuming it
    pub async fn submit(&self, registration: ValidatedRegistration) -> SubmissionResult<SubmissionReceipt> {
        let mut saga = Saga::default();

        match self.run(&registration, &mut saga).await {
            Ok((team, participants)) => {
                info!(team_id = %team.id, team = %team.nombre, "registration complete");
                Ok(SubmissionReceipt {
                    team,
                    participants,
                    events: saga.events,
                })
            }
            Err(error) => {
                warn!(state = %saga.state, error = %error, "registration failed");
                Err(SubmissionFailure {
                    error,
                    state: saga.state,
                    events: saga.events,
                })
            }
        }
    }

    async fn run(
        &self,
        registration: &ValidatedRegistration,
        saga: &mut Saga,
    ) -> Result<(TeamRecord, Vec<ParticipantRecord>), SubmissionError> {
        let team = match self.create_team(registration.name()).await {
            Ok(team) => team,
            Err(source) => {
                saga.advance(SubmissionState::Failed)?;
                return Err(SubmissionError::TeamCreation(source));
            }
        };
        saga.advance(SubmissionState::TeamCreated)?;
        saga.record(SubmissionEvent::TeamCreated {
            team_id: team.id.clone(),
        });

        let mut registered = Vec::with_capacity(TEAM_SIZE);
        for (index, draft) in registration.participants().iter().enumerate() {
            let participant = NewParticipant::from_draft(draft, index, &team.id);

            match self.gateway.register_participant(&team.id, &participant).await {
                Ok(record) => {
                    saga.record(SubmissionEvent::ParticipantRegistered {
                        team_id: team.id.clone(),
                        index,
                    });
                    registered.push(record);
                }
                Err(source) => {
                    warn!(team_id = %team.id, index, error = %source, "participant rejected, deleting team");
                    self.compensate(&team.id, saga).await?;
                    return Err(SubmissionError::ParticipantRegistration { index, source });
                }
            }
        }
        saga.advance(SubmissionState::ParticipantsRegistered)?;

        let document = registration.document();
        if let Err(source) = self.gateway.upload_team_document(&team.id, document).await {
            warn!(team_id = %team.id, error = %source, "document upload failed, deleting team");
            self.compensate(&team.id, saga).await?;
            return Err(SubmissionError::DocumentUpload(source));
        }
        saga.advance(SubmissionState::DocumentUploaded)?;
        saga.record(SubmissionEvent::DocumentUploaded {
            team_id: team.id.clone(),
            file_name: document.file_name().to_string(),
        });

        saga.advance(SubmissionState::Complete)?;
        saga.record(SubmissionEvent::Completed {
            team_id: team.id.clone(),
        });

        Ok((team, registered))
    }

    async fn create_team(&self, name: &str) -> Result<TeamRecord, GatewayError> {
        let team = self
            .gateway
            .create_team(&NewTeam {
                nombre: name.to_string(),
            })
            .await?;

        if team.id.trim().is_empty() {
            return Err(GatewayError::new(
                GatewayErrorKind::InvalidResponse,
                "created team has no id",
            ));
        }
        Ok(team)
    }

    /// Deletes the partially registered team; failures are only logged
    async fn compensate(&self, team_id: &str, saga: &mut Saga) -> Result<(), SubmissionError> {
        if !saga.state.needs_compensation() {
            return Err(SubmissionError::InvalidStateTransition {
                from: saga.state,
                to: SubmissionState::RolledBack,
            });
        }

        match self.gateway.delete_team(team_id).await {
            Ok(()) => {
                warn!(team_id, "team deleted after failed registration");
                saga.record(SubmissionEvent::TeamDeleted {
                    team_id: team_id.to_string(),
                });
            }
            Err(e) => {
                error!(team_id, error = %e, "could not delete team after failed registration");
                saga.record(SubmissionEvent::CompensationFailed {
                    team_id: team_id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
        saga.advance(SubmissionState::RolledBack)
    }
}
