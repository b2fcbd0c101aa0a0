use thiserror::Error;

/// What went wrong talking to the event backend
///
/// Adapters classify failures into these kinds once, so callers never
/// inspect backend error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatewayErrorKind {
    #[error("team name already registered")]
    DuplicateTeamName,

    #[error("participant email already registered")]
    DuplicateEmail,

    #[error("backend request timed out")]
    Timeout,

    #[error("not authorized")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error("request rejected by backend")]
    Rejected,

    #[error("backend unreachable")]
    Transport,

    #[error("unexpected backend response")]
    InvalidResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = GatewayError::new(GatewayErrorKind::DuplicateEmail, "E11000 dup key");
        assert_eq!(
            err.to_string(),
            "participant email already registered: E11000 dup key"
        );
    }
}
