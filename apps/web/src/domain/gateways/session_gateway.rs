use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::GatewayResult;

/// Account as reported by the backend's auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub es_admin: bool,
    #[serde(default)]
    pub activo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Authentication is owned by the backend; this only relays it
#[async_trait]
pub trait SessionGateway: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> GatewayResult<LoginResponse>;

    /// Resolves the user behind a session token (`GET /auth/me`)
    async fn current_user(&self, token: &str) -> GatewayResult<User>;
}
