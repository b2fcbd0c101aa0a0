use reqwest::StatusCode;

use crate::domain::gateways::{GatewayError, GatewayErrorKind};

/// Backend call being made, used to give conflicts a meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateTeam,
    UpdateTeam,
    RegisterParticipant,
    Other,
}

/// Markers the backend's database layer leaves in unique-index violations
const CONFLICT_MARKERS: [&str; 4] = ["duplicate key", "E11000", "IndexKeySpecsConflict", "ya existe"];

/// Turns a non-success backend response into a structured error
///
/// The backend has no error codes, so uniqueness violations are recognised
/// by status 409 or by the database markers in the body.
pub fn classify(operation: Operation, status: StatusCode, body: &str) -> GatewayError {
    let message = extract_message(body).unwrap_or_else(|| status.to_string());

    let conflict = status == StatusCode::CONFLICT
        || CONFLICT_MARKERS.iter().any(|marker| message.contains(marker) || body.contains(marker));

    let kind = if conflict {
        match operation {
            Operation::CreateTeam | Operation::UpdateTeam => GatewayErrorKind::DuplicateTeamName,
            Operation::RegisterParticipant => GatewayErrorKind::DuplicateEmail,
            Operation::Other => GatewayErrorKind::Rejected,
        }
    } else {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayErrorKind::Unauthorized,
            StatusCode::NOT_FOUND => GatewayErrorKind::NotFound,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayErrorKind::Timeout,
            _ => GatewayErrorKind::Rejected,
        }
    };

    GatewayError::new(kind, message)
}

/// Classifies a failure that happened before a response was read
pub fn transport_error(error: reqwest::Error) -> GatewayError {
    let kind = if error.is_timeout() {
        GatewayErrorKind::Timeout
    } else if error.is_decode() {
        GatewayErrorKind::InvalidResponse
    } else {
        GatewayErrorKind::Transport
    };
    GatewayError::new(kind, error.to_string())
}

/// Pulls `message` or `error` out of a JSON error body, or returns the
/// trimmed text body
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
    }
    Some(body.to_string())
}
