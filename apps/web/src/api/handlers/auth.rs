use axum::{extract::State, Json};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::gateways::{LoginResponse, SessionGateway};

/// Request body for admin login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login, relayed to the backend
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let response = state
        .backend
        .login(email, &req.password)
        .await
        .map_err(|e| ApiError::from_gateway("Login failed", e))?;

    tracing::info!(user_id = %response.user.id, "user logged in");
    Ok(Json(response))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
