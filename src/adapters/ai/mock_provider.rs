//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIClient port,
//! allowing tests to run without calling the real AI API.
//!
//! # Features
//!
//! - Pre-configured responses
//! - Simulated delays for timeout testing
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("How long have you had chest pain?")
//!     .with_delay(Duration::from_millis(100));
//!
//! let reply = provider.generate(&transcript).await?;
//! assert_eq!(reply, "How long have you had chest pain?");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIClient, AIError, GenerationConfig, TranscriptEntry};

/// Mock AI provider for testing.
///
/// Configurable to return specific responses, simulate delays, or inject errors.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Generation parameters to report.
    config: GenerationConfig,
    /// Simulated latency per request.
    delay: Duration,
    /// Transcripts received, for verification.
    calls: Arc<Mutex<Vec<Vec<TranscriptEntry>>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return generated text.
    Success(String),
    /// Return an error.
    Error(AIError),
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    /// Creates a new mock provider with default generation settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            config: GenerationConfig::default(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the generation config (including the persona instruction).
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Returns all recorded transcripts.
    pub fn get_calls(&self) -> Vec<Vec<TranscriptEntry>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn push(&self, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }

    /// Gets the next response or a default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| MockResponse::Success("Mock response".to_string()))
    }
}

#[async_trait]
impl AIClient for MockAIProvider {
    async fn generate(&self, transcript: &[TranscriptEntry]) -> Result<String, AIError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(transcript.to_vec());
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn generation_config(&self) -> &GenerationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TranscriptRole;

    fn transcript() -> Vec<TranscriptEntry> {
        vec![TranscriptEntry::new(TranscriptRole::User, "Hello")]
    }

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.generate(&transcript()).await.unwrap(), "first");
        assert_eq!(provider.generate(&transcript()).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn returns_default_when_queue_empty() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.generate(&transcript()).await.unwrap(), "Mock response");
    }

    #[tokio::test]
    async fn returns_injected_error() {
        let provider = MockAIProvider::new().with_error(AIError::status(503, "overloaded"));
        let err = provider.generate(&transcript()).await.unwrap_err();
        assert_eq!(err, AIError::status(503, "overloaded"));
    }

    #[tokio::test]
    async fn records_transcripts() {
        let provider = MockAIProvider::new();
        provider.generate(&transcript()).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.get_calls()[0], transcript());
    }

    #[tokio::test]
    async fn clones_share_call_history() {
        let provider = MockAIProvider::new();
        let clone = provider.clone();
        clone.generate(&transcript()).await.unwrap();
        assert_eq!(provider.call_count(), 1);
    }
}
