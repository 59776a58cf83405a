//! AI Client Port - Interface for the generative-AI text completion provider.
//!
//! The application hands the client an ordered transcript and receives the
//! generated reply text. Generation parameters and the persona instruction are
//! fixed per client instance ([`GenerationConfig`]), not per request.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoClient(GenerationConfig);
//!
//! #[async_trait]
//! impl AIClient for EchoClient {
//!     async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, AIError> {
//!         Ok(transcript.last().map(|e| e.text.clone()).unwrap_or_default())
//!     }
//!
//!     fn generation_config(&self) -> &GenerationConfig {
//!         &self.0
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::conversation::CARDIOLOGIST_INSTRUCTION;

/// Port for generative-AI completions.
#[async_trait]
pub trait AIClient: Send + Sync {
    /// Generate a reply for the transcript.
    ///
    /// Returns the first text segment of the first candidate, or a fallback
    /// sentence when the provider produced no usable candidate.
    async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, AIError>;

    /// Generation parameters this client was constructed with.
    fn generation_config(&self) -> &GenerationConfig;
}

/// Reply used when the provider answers successfully but without text.
pub const NO_CANDIDATE_FALLBACK: &str = "AI did not provide a valid response.";

/// Role vocabulary of the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    /// Human input; also carries the persona instruction.
    User,
    /// Model (assistant) output.
    Model,
}

impl TranscriptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Model => "model",
        }
    }
}

/// One turn of the transcript sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(role: TranscriptRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// The synthetic persona entry.
    ///
    /// The provider has no system role inside `contents`, so the instruction
    /// is attributed to the user role.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self::new(TranscriptRole::User, text)
    }
}

/// Content-safety blocking threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyThreshold {
    BlockNone,
    #[default]
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

impl SafetyThreshold {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyThreshold::BlockNone => "BLOCK_NONE",
            SafetyThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
            SafetyThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            SafetyThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
        }
    }
}

impl fmt::Display for SafetyThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed generation parameters and persona for an AI client.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
    pub safety_threshold: SafetyThreshold,
    pub instruction_text: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 800,
            top_p: 0.8,
            top_k: 10,
            safety_threshold: SafetyThreshold::BlockOnlyHigh,
            instruction_text: CARDIOLOGIST_INSTRUCTION.to_string(),
        }
    }
}

impl GenerationConfig {
    /// Sets the persona instruction.
    pub fn with_instruction(mut self, text: impl Into<String>) -> Self {
        self.instruction_text = text.into();
        self
    }
}

/// AI client errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// Provider could not be reached.
    #[error("AI API request failed: {0}")]
    Network(String),

    /// Request timed out.
    #[error("AI API request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Provider answered with a non-success status.
    #[error("AI API returned non-OK status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Provider response could not be decoded.
    #[error("failed to decode AI API response: {0}")]
    Parse(String),
}

impl AIError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}
