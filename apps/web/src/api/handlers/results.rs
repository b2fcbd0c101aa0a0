use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::gateways::EventGateway;
use crate::domain::participant::Discipline;
use crate::domain::results::awards::{self, Podium, Prize};
use crate::domain::results::standings::{self, Standing};

/// Public results for one discipline
#[derive(Debug, Serialize)]
pub struct DisciplineResults {
    pub disciplina: Discipline,
    pub visibles: bool,
    pub resultados: Vec<Standing>,
}

/// Standings of a discipline, fastest first
///
/// GET /api/resultados/disciplina/:disciplina
///
/// While results are hidden the payload is empty and `visibles` is false.
pub async fn discipline_results(
    State(state): State<AppState>,
    Path(disciplina): Path<String>,
) -> Result<Json<DisciplineResults>, ApiError> {
    let discipline = Discipline::normalize(&disciplina);
    if discipline.race_position().is_none() {
        return Err(ApiError::not_found(format!("Disciplina desconocida: {}", disciplina)));
    }

    if !results_visible(&state).await? {
        return Ok(Json(DisciplineResults {
            disciplina: discipline,
            visibles: false,
            resultados: Vec::new(),
        }));
    }

    let (participants, teams) = tokio::try_join!(
        state.backend.discipline_results(discipline),
        state.backend.list_teams(),
    )
    .map_err(|e| ApiError::from_gateway("Error obteniendo resultados", e))?;

    let mut resultados = standings::with_team_names(participants, &teams);
    standings::rank_by_time(&mut resultados);

    Ok(Json(DisciplineResults {
        disciplina: discipline,
        visibles: true,
        resultados,
    }))
}

#[derive(Debug, Serialize)]
pub struct PodiumResults {
    pub visibles: bool,
    #[serde(flatten)]
    pub podium: Podium,
}

/// Overall team classification
///
/// GET /api/resultados/podio
pub async fn podium(State(state): State<AppState>) -> Result<Json<PodiumResults>, ApiError> {
    if !results_visible(&state).await? {
        return Ok(Json(PodiumResults {
            visibles: false,
            podium: Podium::default(),
        }));
    }

    let podium = state
        .backend
        .podium()
        .await
        .map_err(|e| ApiError::from_gateway("Error obteniendo podio", e))?;

    Ok(Json(PodiumResults {
        visibles: true,
        podium: podium.ordered(),
    }))
}

#[derive(Debug, Serialize)]
pub struct PrizeResults {
    pub visibles: bool,
    pub premios: Vec<Prize>,
}

/// Individual prizes in race order
///
/// GET /api/premios
pub async fn prizes(State(state): State<AppState>) -> Result<Json<PrizeResults>, ApiError> {
    if !results_visible(&state).await? {
        return Ok(Json(PrizeResults {
            visibles: false,
            premios: Vec::new(),
        }));
    }

    let mut premios = state
        .backend
        .prizes()
        .await
        .map_err(|e| ApiError::from_gateway("Error obteniendo premios", e))?;
    awards::sort_prizes(&mut premios);

    Ok(Json(PrizeResults {
        visibles: true,
        premios,
    }))
}

async fn results_visible(state: &AppState) -> Result<bool, ApiError> {
    let visibility = state
        .backend
        .results_visibility()
        .await
        .map_err(|e| ApiError::from_gateway("Error consultando visibilidad", e))?;

    Ok(visibility.resultados_visibles)
}
