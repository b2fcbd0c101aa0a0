use async_trait::async_trait;

use super::errors::GatewayResult;
use crate::domain::participant::{NewParticipant, ParticipantRecord};
use crate::domain::team::{NewTeam, TeamDocument, TeamRecord};

/// Backend calls needed to register a team
///
/// Implementations map every failure to a
/// [`GatewayErrorKind`](super::errors::GatewayErrorKind).
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// `POST /equipos`
    async fn create_team(&self, team: &NewTeam) -> GatewayResult<TeamRecord>;

    /// `POST /equipos/{id}/participantes`
    async fn register_participant(
        &self,
        team_id: &str,
        participant: &NewParticipant,
    ) -> GatewayResult<ParticipantRecord>;

    /// `DELETE /equipos/{id}`
    async fn delete_team(&self, team_id: &str) -> GatewayResult<()>;

    /// `POST /archivos/upload-file-pdf`
    async fn upload_team_document(&self, team_id: &str, document: &TeamDocument) -> GatewayResult<()>;
}
