//! HTTP listener settings (`MEDIBOT__SERVER__*`).

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where and how the API listens.
///
/// Every field has a default, so the whole section may be omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// Filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Deadline for a whole request. A chat turn waits on the AI provider,
    /// so this must stay above `ai.timeout_secs`.
    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins. Any origin is allowed when unset.
    pub cors_origins: Option<String>,
}

/// Deployment environment. Production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,medibot=debug,tower_http=debug,sqlx=warn".to_string(),
            request_timeout_secs: 150,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured origins with blanks dropped.
    pub fn allowed_origins(&self) -> Vec<&str> {
        self.cors_origins
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;
    use serde_json::json;

    fn from_json(value: serde_json::Value) -> ServerConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn omitted_section_listens_on_8080() {
        let config = from_json(json!({}));
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = from_json(json!({"port": 3000, "environment": "production"}));
        assert_eq!(config.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.request_timeout(), Duration::from_secs(150));
    }

    #[test]
    fn default_deadline_outlasts_ai_timeout() {
        assert!(ServerConfig::default().request_timeout() > AiConfig::default().timeout());
    }

    #[test]
    fn default_log_filter_enables_crate_debug() {
        assert!(ServerConfig::default().log_level.contains("medibot=debug"));
    }

    #[test]
    fn allowed_origins_skip_blanks() {
        let config = ServerConfig {
            cors_origins: Some(" http://localhost:8081 ,,http://localhost:19006,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.allowed_origins(),
            vec!["http://localhost:8081", "http://localhost:19006"]
        );
        assert!(ServerConfig::default().allowed_origins().is_empty());
    }

    #[test]
    fn rejects_unusable_listener() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(zero_port.validate(), Err(ValidationError::InvalidPort));

        let hostname = ServerConfig {
            host: "medibot.local".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            hostname.validate(),
            Err(ValidationError::InvalidBindAddress(_))
        ));
    }

    #[test]
    fn rejects_request_timeout_outside_range() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }
}
