//! Gemini Provider - Implementation of AIClient for Google's Generative Language API.
//!
//! Posts the transcript to `{base_url}/{model}:generateContent?key={api_key}`
//! and returns the first text part of the first candidate.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.0-flash")
//!     .with_generation(GenerationConfig::default());
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! No retries are attempted: every failure is returned to the caller.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIClient, AIError, GenerationConfig, TranscriptEntry, NO_CANDIDATE_FALLBACK,
};

/// Only safety category the provider is configured for.
const DANGEROUS_CONTENT_CATEGORY: &str = "HARM_CATEGORY_DANGEROUS_CONTENT";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Base URL of the models collection.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Fixed generation parameters and persona.
    pub generation: GenerationConfig,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout: Duration::from_secs(120),
            generation: GenerationConfig::default(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the generation parameters.
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AIError::Network` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL (without the key).
    fn endpoint_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts the transcript and fixed settings to Gemini's request format.
    fn to_gemini_request(&self, transcript: &[TranscriptEntry]) -> GeminiRequest {
        let generation = &self.config.generation;

        GeminiRequest {
            contents: transcript
                .iter()
                .map(|entry| GeminiContent {
                    role: entry.role.as_str().to_string(),
                    parts: vec![GeminiPart {
                        text: entry.text.clone(),
                    }],
                })
                .collect(),
            generation_config: GeminiGenerationConfig {
                temperature: generation.temperature,
                max_output_tokens: generation.max_output_tokens,
                top_p: generation.top_p,
                top_k: generation.top_k,
            },
            safety_settings: vec![GeminiSafetySetting {
                category: DANGEROUS_CONTENT_CATEGORY.to_string(),
                threshold: generation.safety_threshold.as_str().to_string(),
            }],
        }
    }

    /// Sends the request, mapping transport failures.
    async fn send_request(&self, transcript: &[TranscriptEntry]) -> Result<Response, AIError> {
        let body = self.to_gemini_request(transcript);

        self.client
            .post(self.endpoint_url())
            .query(&[("key", self.config.api_key())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e.without_url()))
                } else {
                    AIError::network(e.without_url().to_string())
                }
            })
    }

    /// Rejects non-success statuses, keeping the provider's body text.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Gemini API returned error status");
        Err(AIError::status(status.as_u16(), error_body))
    }

    /// Parses a successful response body into reply text.
    async fn parse_response(&self, response: Response) -> Result<String, AIError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(e.without_url().to_string()))?;

        Ok(extract_reply(gemini_response))
    }
}

#[async_trait]
impl AIClient for GeminiProvider {
    async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, AIError> {
        tracing::debug!(
            model = %self.config.model,
            entries = transcript.len(),
            "Requesting Gemini completion"
        );

        let response = self.send_request(transcript).await?;
        self.parse_response(response).await
    }

    fn generation_config(&self) -> &GenerationConfig {
        &self.config.generation
    }
}

/// First text part of the first candidate, or the fallback sentence.
fn extract_reply(response: GeminiResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .unwrap_or_else(|| NO_CANDIDATE_FALLBACK.to_string())
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
    safety_settings: Vec<GeminiSafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
    top_p: f64,
    top_k: u32,
}

#[derive(Debug, Serialize)]
struct GeminiSafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}
