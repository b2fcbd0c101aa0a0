use std::sync::Arc;

use crate::config::{ConfigError, Settings};
use crate::domain::gateways::GatewayError;
use crate::domain::validation::ValidationRules;
use crate::infrastructure::http::HttpBackend;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub backend: HttpBackend,
    pub settings: Arc<Settings>,
    pub rules: Arc<ValidationRules>,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not build backend client: {0}")]
    Backend(#[from] GatewayError),
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, StateError> {
        let rules = settings.validation_rules()?;
        let backend = HttpBackend::new(settings.backend_url.clone(), settings.request_timeout)?;

        Ok(Self {
            backend,
            settings: Arc::new(settings),
            rules: Arc::new(rules),
        })
    }
}
