//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::ports::{GenerationConfig, SafetyThreshold};

/// AI provider configuration (Gemini `generateContent`)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Base URL of the models collection
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name appended to the base URL
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Threshold for the dangerous-content safety category
    #[serde(default)]
    pub safety_threshold: SafetyThreshold,

    /// Replaces the built-in cardiologist persona when set
    pub instruction_text: Option<String>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Generation parameters handed to the AI client
    pub fn generation_config(&self) -> GenerationConfig {
        let base = GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
            top_k: self.top_k,
            safety_threshold: self.safety_threshold,
            ..GenerationConfig::default()
        };

        match self.instruction_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => base.with_instruction(text),
            _ => base,
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_gemini() {
            return Err(ValidationError::MissingRequired("MEDIBOT__AI__GEMINI_API_KEY"));
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MEDIBOT__AI__MODEL"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidGenerationParameter("temperature"));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ValidationError::InvalidGenerationParameter("top_p"));
        }
        if self.max_output_tokens == 0 {
            return Err(ValidationError::InvalidGenerationParameter("max_output_tokens"));
        }
        if self.top_k == 0 {
            return Err(ValidationError::InvalidGenerationParameter("top_k"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            safety_threshold: SafetyThreshold::default(),
            instruction_text: None,
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    800
}

fn default_top_p() -> f64 {
    0.8
}

fn default_top_k() -> u32 {
    10
}
