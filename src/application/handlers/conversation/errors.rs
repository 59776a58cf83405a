//! Errors for the conversation handlers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::{AIError, StoreError};

/// Failure of a `Converse` call.
///
/// A missing conversation never shows up here: it is resolved by creating a
/// new one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConverseError {
    /// Malformed input. Raised before any side effect.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Persistence failed. Earlier writes are kept.
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),

    /// The AI provider failed. The user message is already persisted.
    #[error("AI service error: {0}")]
    Provider(#[from] AIError),
}

/// Failure of a read-only conversation query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversationQueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_carries_provider_detail() {
        let err = ConverseError::from(AIError::status(500, "internal"));
        assert_eq!(
            err.to_string(),
            "AI service error: AI API returned non-OK status 500: internal"
        );
    }

    #[test]
    fn validation_error_is_transparent() {
        let err = ConverseError::from(ValidationError::empty_field("userId"));
        assert_eq!(err.to_string(), "Field 'userId' cannot be empty");
    }
}
