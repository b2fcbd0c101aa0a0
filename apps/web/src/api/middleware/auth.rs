use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::gateways::{GatewayErrorKind, SessionGateway, User};
use crate::infrastructure::http::HttpBackend;

/// Verified administrator session for protected routes
///
/// The bearer token is checked against the backend's `/auth/me`; handlers
/// receive it explicitly instead of reading any global session.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     State(state): State<AppState>,
///     session: AdminSession,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", session.user.email))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub user: User,
}

impl AdminSession {
    /// Backend client acting on behalf of this session
    pub fn backend(&self, state: &AppState) -> HttpBackend {
        state.backend.authorized(self.token.clone())
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>"))?;

    if token.is_empty() || token == "null" || token == "undefined" {
        return Err(ApiError::unauthorized("Missing session token"));
    }
    Ok(token)
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.to_string();

        let user = state.backend.current_user(&token).await.map_err(|e| match e.kind {
            GatewayErrorKind::Unauthorized | GatewayErrorKind::NotFound => {
                ApiError::unauthorized(format!("Invalid session: {}", e.message))
            }
            _ => ApiError::from(e),
        })?;

        if !user.es_admin {
            return Err(ApiError::forbidden("Administrator access required"));
        }

        Ok(AdminSession { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/admin/equipos");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_bearer_token() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def"))).unwrap(), "abc.def");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(bearer_token(&parts(None)).is_err());
        assert!(bearer_token(&parts(Some("Basic xyz"))).is_err());
    }

    #[test]
    fn rejects_serialized_null_tokens() {
        assert!(bearer_token(&parts(Some("Bearer null"))).is_err());
        assert!(bearer_token(&parts(Some("Bearer undefined"))).is_err());
        assert!(bearer_token(&parts(Some("Bearer "))).is_err());
    }
}
