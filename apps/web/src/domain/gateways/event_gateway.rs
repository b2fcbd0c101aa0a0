use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::GatewayResult;
use crate::domain::participant::{Discipline, ParticipantRecord};
use crate::domain::results::{Podium, Prize};
use crate::domain::team::{TeamRecord, TeamUpdate};

/// Whether published results are shown to the public
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsVisibility {
    pub resultados_visibles: bool,
}

/// Read and administration calls against the event backend
#[async_trait]
pub trait EventGateway: Send + Sync {
    async fn list_teams(&self) -> GatewayResult<Vec<TeamRecord>>;

    async fn team(&self, team_id: &str) -> GatewayResult<TeamRecord>;

    async fn update_team(&self, team_id: &str, update: &TeamUpdate) -> GatewayResult<TeamRecord>;

    async fn team_participants(&self, team_id: &str) -> GatewayResult<Vec<ParticipantRecord>>;

    async fn list_participants(&self) -> GatewayResult<Vec<ParticipantRecord>>;

    async fn discipline_results(&self, discipline: Discipline) -> GatewayResult<Vec<ParticipantRecord>>;

    async fn results_visibility(&self) -> GatewayResult<ResultsVisibility>;

    async fn set_results_visibility(&self, visible: bool) -> GatewayResult<ResultsVisibility>;

    async fn delete_team(&self, team_id: &str) -> GatewayResult<()>;

    /// `PUT /equipos/{team}/participantes/{id}` with the new `tiempo`
    async fn update_participant_time(
        &self,
        team_id: &str,
        participant_id: &str,
        time: &str,
    ) -> GatewayResult<()>;

    /// Asks the backend to recompute a team's total time
    async fn recalculate_team_time(&self, team_id: &str) -> GatewayResult<()>;

    /// Asks the backend to recompute every team's position
    async fn update_positions(&self) -> GatewayResult<()>;

    async fn apply_penalty(&self, participant_id: &str, discipline: Discipline) -> GatewayResult<()>;

    async fn set_special_prize(&self, participant_id: &str) -> GatewayResult<()>;

    /// `GET /resultados/podio`
    async fn podium(&self) -> GatewayResult<Podium>;

    /// `GET /premios`
    async fn prizes(&self) -> GatewayResult<Vec<Prize>>;

    /// Asks the backend to award the individual prizes and returns them
    async fn calculate_prizes(&self) -> GatewayResult<Vec<Prize>>;
}
