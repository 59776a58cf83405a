//! AI Provider Adapters.
//!
//! Implementations of the AIClient port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini `generateContent` API
//! - `MockAIProvider` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockResponse};
