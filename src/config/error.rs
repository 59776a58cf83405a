//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address {0}")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Database pool size {0} outside 1..=100")]
    InvalidPoolSize(u32),

    #[error("AI base URL must use http or https")]
    InvalidAiBaseUrl,

    #[error("Invalid generation parameter {0}")]
    InvalidGenerationParameter(&'static str),

    #[error("AI timeout ({ai_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    AiTimeoutExceedsRequestTimeout { ai_secs: u64, request_secs: u64 },
}
