//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own module with DTOs, handlers and routes; they are
//! merged into one router by [`app_router`].

pub mod chat;
mod error;
mod router;
mod state;
pub mod user;

pub use error::{ApiError, ErrorResponse};
pub use router::app_router;
pub use state::AppState;
