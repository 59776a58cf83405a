//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and validation errors that form the
//! vocabulary of the Medibot domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ConversationId, MessageId, UserId};
pub use timestamp::Timestamp;
