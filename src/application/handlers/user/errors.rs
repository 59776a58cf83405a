//! Errors for the user handlers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::StoreError;

/// User registration and lookup failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No user registered with email {email}")]
    NotFound { email: String },

    #[error("A user with email {email} already exists")]
    AlreadyExists { email: String },

    #[error("storage failure: {0}")]
    Store(StoreError),
}
