use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{admin, auth as auth_handlers, registration, results, teams};
use super::state::AppState;

/// Room for the text fields of the registration form on top of the document
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the service router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.settings.max_document_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        // Health check
        .route("/health", get(auth_handlers::health_check))
        // Registration
        .route("/api/inscripcion/estado", get(registration::registration_window))
        .route("/api/inscripcion", post(registration::register_team))
        // Public listings
        .route("/api/equipos", get(teams::list_teams))
        .route("/api/equipos/:id", get(teams::get_team))
        .route("/api/participantes", get(teams::list_participants))
        .route(
            "/api/resultados/disciplina/:disciplina",
            get(results::discipline_results),
        )
        .route("/api/resultados/podio", get(results::podium))
        .route("/api/premios", get(results::prizes))
        // Auth
        .route("/api/auth/login", post(auth_handlers::login))
        // Admin
        .route(
            "/api/admin/resultados/visibilidad",
            get(admin::results_visibility).put(admin::set_results_visibility),
        )
        .route(
            "/api/admin/equipos/:id/participantes",
            get(admin::team_participants),
        )
        .route(
            "/api/admin/equipos/:id",
            put(admin::update_team).delete(admin::delete_team),
        )
        .route(
            "/api/admin/equipos/:id/participantes/:participante_id/tiempo",
            put(admin::record_time),
        )
        .route(
            "/api/admin/resultados/calcular-premios",
            post(admin::calculate_prizes),
        )
        .route(
            "/api/admin/participantes/:id/penalizacion",
            post(admin::apply_penalty),
        )
        .route(
            "/api/admin/participantes/:id/premio-especial",
            post(admin::set_special_prize),
        )
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
