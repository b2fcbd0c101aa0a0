use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Url;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::domain::team::document::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::domain::validation::ValidationRules;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BACKEND_URL: &str = "http://localhost:4000/api";
const DEFAULT_TIMEOUT_SECS: &str = "15";
const DEFAULT_DEADLINE: &str = "2025-11-12T23:59:59-05:00";
const DEFAULT_DOMAIN: &str = "uptc.edu.co";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings of the web service
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub backend_url: Url,
    pub request_timeout: Duration,
    /// Registrations are refused after this instant
    pub registration_deadline: DateTime<FixedOffset>,
    pub max_document_bytes: usize,
    pub institutional_domain: String,
}

impl Settings {
    /// Reads settings from the process environment
    ///
    /// Missing variables fall back to defaults with a warning; malformed
    /// ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &'static str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                tracing::warn!("{} not set, using default {}", key, default);
                default.to_string()
            })
        };

        let bind_addr = parse("BIND_ADDR", get("BIND_ADDR", DEFAULT_BIND_ADDR), |v| {
            v.parse::<SocketAddr>().map_err(|e| e.to_string())
        })?;
        let backend_url = parse("BACKEND_URL", get("BACKEND_URL", DEFAULT_BACKEND_URL), |v| {
            let url = Url::parse(v).map_err(|e| e.to_string())?;
            if url.cannot_be_a_base() {
                return Err("not a base url".to_string());
            }
            Ok(url)
        })?;
        let timeout_secs = parse(
            "REQUEST_TIMEOUT_SECS",
            get("REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            |v| match v.parse::<u64>() {
                Ok(0) => Err("must be positive".to_string()),
                Ok(secs) => Ok(secs),
                Err(e) => Err(e.to_string()),
            },
        )?;
        let registration_deadline = parse(
            "REGISTRATION_DEADLINE",
            get("REGISTRATION_DEADLINE", DEFAULT_DEADLINE),
            |v| DateTime::parse_from_rfc3339(v).map_err(|e| e.to_string()),
        )?;
        let max_document_bytes = match lookup("MAX_DOCUMENT_BYTES") {
            Some(value) => parse("MAX_DOCUMENT_BYTES", value, |v| {
                v.parse::<usize>().map_err(|e| e.to_string())
            })?,
            None => DEFAULT_MAX_DOCUMENT_BYTES,
        };
        let institutional_domain = get("INSTITUTIONAL_DOMAIN", DEFAULT_DOMAIN);

        Ok(Self {
            bind_addr,
            backend_url,
            request_timeout: Duration::from_secs(timeout_secs),
            registration_deadline,
            max_document_bytes,
            institutional_domain,
        })
    }

    pub fn registration_open_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.registration_deadline.with_timezone(&Utc)
    }

    pub fn validation_rules(&self) -> Result<ValidationRules, ConfigError> {
        ValidationRules::new(&self.institutional_domain, self.max_document_bytes).map_err(|e| {
            ConfigError::Invalid {
                key: "INSTITUTIONAL_DOMAIN",
                value: self.institutional_domain.clone(),
                reason: e.to_string(),
            }
        })
    }
}

fn parse<T>(
    key: &'static str,
    value: String,
    parser: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    parser(value.trim()).map_err(|reason| ConfigError::Invalid { key, value, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.backend_url.as_str(), "http://localhost:4000/api");
        assert_eq!(settings.request_timeout, Duration::from_secs(15));
        assert_eq!(settings.max_document_bytes, 5 * 1024 * 1024);
        assert_eq!(settings.institutional_domain, "uptc.edu.co");
    }

    #[test]
    fn overrides_are_read() {
        let settings = settings(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("BACKEND_URL", "https://api.example.org/v1"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("MAX_DOCUMENT_BYTES", "1024"),
        ])
        .unwrap();

        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.backend_url.host_str(), Some("api.example.org"));
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.max_document_bytes, 1024);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(settings(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(settings(&[("REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(settings(&[("BACKEND_URL", "mailto:x@y.z")]).is_err());
        assert!(settings(&[("REGISTRATION_DEADLINE", "12/11/2025")]).is_err());
    }

    #[test]
    fn deadline_is_inclusive() {
        let settings = settings(&[("REGISTRATION_DEADLINE", "2025-11-12T23:59:59-05:00")]).unwrap();

        let last_second = Utc.with_ymd_and_hms(2025, 11, 13, 4, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 11, 13, 5, 0, 0).unwrap();
        assert!(settings.registration_open_at(last_second));
        assert!(!settings.registration_open_at(after));
    }

    #[test]
    fn error_names_the_variable() {
        let err = settings(&[("BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }
}
