use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::gateways::EventGateway;
use crate::domain::results::standings::{self, Standing};
use crate::domain::team::TeamRecord;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// List registered teams
///
/// GET /api/equipos
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<TeamRecord>>, ApiError> {
    let teams = state
        .backend
        .list_teams()
        .await
        .map_err(|e| ApiError::from_gateway("Error obteniendo equipos", e))?;

    Ok(Json(teams))
}

/// GET /api/equipos/:id
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamRecord>, ApiError> {
    let team = state
        .backend
        .team(&team_id)
        .await
        .map_err(|e| ApiError::from_gateway("Error obteniendo equipo", e))?;

    Ok(Json(team))
}

/// Participant roster with team names, sorted by name
///
/// GET /api/participantes?q=
pub async fn list_participants(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Standing>>, ApiError> {
    let (participants, teams) = tokio::try_join!(
        state.backend.list_participants(),
        state.backend.list_teams(),
    )
    .map_err(|e| ApiError::from_gateway("Error obteniendo participantes", e))?;

    let mut roster = standings::with_team_names(participants, &teams);
    standings::sort_by_name(&mut roster);

    Ok(Json(standings::filter(roster, &query.q)))
}
