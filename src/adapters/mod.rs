//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Gemini client and a mock AI provider
//! - `http` - axum routes, DTOs and error mapping
//! - `memory` - in-memory Store
//! - `postgres` - PostgreSQL Store

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider, MockResponse};
pub use http::{app_router, AppState};
pub use memory::{InMemoryStore, StoreOperation};
pub use postgres::PostgresStore;
