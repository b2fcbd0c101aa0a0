use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::gateways::{GatewayError, GatewayErrorKind};

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 403 Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Wraps a backend failure, prefixing what was being attempted
    pub fn from_gateway(context: &str, error: GatewayError) -> Self {
        let status = status_for(error.kind);
        Self::new(status, format!("{}: {}", context, error))
    }
}

/// HTTP status that best describes a backend failure to our own caller
pub fn status_for(kind: GatewayErrorKind) -> StatusCode {
    match kind {
        GatewayErrorKind::DuplicateTeamName | GatewayErrorKind::DuplicateEmail => StatusCode::CONFLICT,
        GatewayErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        GatewayErrorKind::NotFound => StatusCode::NOT_FOUND,
        GatewayErrorKind::Rejected => StatusCode::BAD_REQUEST,
        GatewayErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        GatewayErrorKind::Transport | GatewayErrorKind::InvalidResponse => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self::new(status_for(error.kind), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_kinds_map_to_statuses() {
        assert_eq!(status_for(GatewayErrorKind::DuplicateEmail), StatusCode::CONFLICT);
        assert_eq!(status_for(GatewayErrorKind::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(status_for(GatewayErrorKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(GatewayErrorKind::Transport), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn context_is_prefixed() {
        let err = ApiError::from_gateway(
            "Error actualizando tiempo",
            GatewayError::new(GatewayErrorKind::NotFound, "no such participant"),
        );
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.message.starts_with("Error actualizando tiempo: "));
    }
}
