use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::middleware::AdminSession;
use crate::api::state::AppState;
use crate::domain::gateways::{EventGateway, ResultsVisibility};
use crate::domain::participant::{Discipline, ParticipantRecord};
use crate::domain::results::{awards, race_time, standings, Prize};
use crate::domain::team::{TeamRecord, TeamUpdate};
use crate::domain::validation::Problem;

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct TeamUpdateRequest {
    pub nombre: String,
}

#[derive(Debug, Deserialize)]
pub struct TimeRequest {
    pub tiempo: String,
}

#[derive(Debug, Deserialize)]
pub struct PenaltyRequest {
    pub disciplina: String,
}

#[derive(Debug, Serialize)]
pub struct TimeResponse {
    pub tiempo: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /api/admin/resultados/visibilidad
pub async fn results_visibility(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<Json<ResultsVisibility>, ApiError> {
    let visibility = session
        .backend(&state)
        .results_visibility()
        .await
        .map_err(|e| ApiError::from_gateway("Error consultando visibilidad", e))?;

    Ok(Json(visibility))
}

/// Show or hide public results
///
/// PUT /api/admin/resultados/visibilidad
pub async fn set_results_visibility(
    State(state): State<AppState>,
    session: AdminSession,
    Json(req): Json<VisibilityRequest>,
) -> Result<Json<ResultsVisibility>, ApiError> {
    let visibility = session
        .backend(&state)
        .set_results_visibility(req.visible)
        .await
        .map_err(|e| ApiError::from_gateway("Error actualizando visibilidad", e))?;

    tracing::info!(
        admin = %session.user.email,
        visible = visibility.resultados_visibles,
        "results visibility changed"
    );
    Ok(Json(visibility))
}

/// Participants of a team in race order
///
/// GET /api/admin/equipos/:id/participantes
pub async fn team_participants(
    State(state): State<AppState>,
    session: AdminSession,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<ParticipantRecord>>, ApiError> {
    let mut participants = session
        .backend(&state)
        .team_participants(&team_id)
        .await
        .map_err(|e| ApiError::from_gateway("Error obteniendo participantes", e))?;

    standings::order_by_discipline(&mut participants);
    Ok(Json(participants))
}

/// DELETE /api/admin/equipos/:id
pub async fn delete_team(
    State(state): State<AppState>,
    session: AdminSession,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    session
        .backend(&state)
        .delete_team(&team_id)
        .await
        .map_err(|e| ApiError::from_gateway("Error eliminando equipo", e))?;

    tracing::info!(admin = %session.user.email, team_id = %team_id, "team deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Rename a team
///
/// PUT /api/admin/equipos/:id
pub async fn update_team(
    State(state): State<AppState>,
    session: AdminSession,
    Path(team_id): Path<String>,
    Json(req): Json<TeamUpdateRequest>,
) -> Result<Json<TeamRecord>, ApiError> {
    let update = TeamUpdate::new(&req.nombre).map_err(|problem| match problem {
        Problem::TooLong => ApiError::bad_request("El nombre del equipo es demasiado largo"),
        _ => ApiError::bad_request("El nombre del equipo es obligatorio"),
    })?;

    let team = session
        .backend(&state)
        .update_team(&team_id, &update)
        .await
        .map_err(|e| ApiError::from_gateway("Error al actualizar equipo", e))?;

    tracing::info!(admin = %session.user.email, team_id = %team_id, "team updated");
    Ok(Json(team))
}

/// Record a participant's time and refresh the rankings
///
/// PUT /api/admin/equipos/:id/participantes/:participante_id/tiempo
///
/// The time is masked and checked first. Then the participant is updated,
/// the team total recomputed and positions refreshed, in that order; the
/// first failing step ends the request.
pub async fn record_time(
    State(state): State<AppState>,
    session: AdminSession,
    Path((team_id, participant_id)): Path<(String, String)>,
    Json(req): Json<TimeRequest>,
) -> Result<Json<TimeResponse>, ApiError> {
    let tiempo = race_time::mask_input(&req.tiempo);
    if !race_time::is_valid_format(&tiempo) {
        return Err(ApiError::bad_request(
            "Formato de tiempo inválido. Use HH:MM:SS.000",
        ));
    }

    let backend = session.backend(&state);
    backend
        .update_participant_time(&team_id, &participant_id, &tiempo)
        .await
        .map_err(|e| ApiError::from_gateway("Error actualizando tiempo", e))?;
    backend
        .recalculate_team_time(&team_id)
        .await
        .map_err(|e| ApiError::from_gateway("Error calculando tiempo del equipo", e))?;
    backend
        .update_positions()
        .await
        .map_err(|e| ApiError::from_gateway("Error actualizando posiciones", e))?;

    tracing::info!(
        team_id = %team_id,
        participant_id = %participant_id,
        tiempo = %tiempo,
        "time recorded"
    );
    Ok(Json(TimeResponse {
        tiempo,
        message: "Tiempo actualizado correctamente",
    }))
}

/// POST /api/admin/participantes/:id/penalizacion
pub async fn apply_penalty(
    State(state): State<AppState>,
    session: AdminSession,
    Path(participant_id): Path<String>,
    Json(req): Json<PenaltyRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let discipline = Discipline::normalize(&req.disciplina);
    if discipline == Discipline::Ninguno {
        return Err(ApiError::bad_request(format!(
            "Disciplina inválida: {}",
            req.disciplina
        )));
    }

    session
        .backend(&state)
        .apply_penalty(&participant_id, discipline)
        .await
        .map_err(|e| ApiError::from_gateway("Error aplicando penalización", e))?;

    Ok(Json(MessageResponse {
        message: "Penalización aplicada",
    }))
}

/// POST /api/admin/participantes/:id/premio-especial
pub async fn set_special_prize(
    State(state): State<AppState>,
    session: AdminSession,
    Path(participant_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    session
        .backend(&state)
        .set_special_prize(&participant_id)
        .await
        .map_err(|e| ApiError::from_gateway("Error asignando premio especial", e))?;

    Ok(Json(MessageResponse {
        message: "Premio especial asignado",
    }))
}

/// Award the individual prizes from the recorded times
///
/// POST /api/admin/resultados/calcular-premios
pub async fn calculate_prizes(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<Json<Vec<Prize>>, ApiError> {
    let mut prizes = session
        .backend(&state)
        .calculate_prizes()
        .await
        .map_err(|e| ApiError::from_gateway("Ocurrió un error al calcular los premios", e))?;
    awards::sort_prizes(&mut prizes);

    tracing::info!(admin = %session.user.email, count = prizes.len(), "prizes calculated");
    Ok(Json(prizes))
}
