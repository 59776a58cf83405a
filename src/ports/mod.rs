//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and the outside world. Adapters implement these ports.
//!
//! - `Store` - Relational persistence of users, conversations and messages
//! - `AIClient` - Generative-AI text completion provider

mod ai_client;
mod store;

pub use ai_client::{
    AIClient, AIError, GenerationConfig, SafetyThreshold, TranscriptEntry, TranscriptRole,
    NO_CANDIDATE_FALLBACK,
};
pub use store::{Store, StoreError};
