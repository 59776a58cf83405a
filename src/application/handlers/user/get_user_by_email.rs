//! GetUserByEmailHandler - Query handler for looking up a user by email.

use std::sync::Arc;

use super::errors::UserError;
use crate::domain::foundation::ValidationError;
use crate::domain::user::User;
use crate::ports::Store;

/// Query for a user by email address.
#[derive(Debug, Clone)]
pub struct GetUserByEmailQuery {
    pub email: String,
}

/// Handler for user lookups.
pub struct GetUserByEmailHandler {
    store: Arc<dyn Store>,
}

impl GetUserByEmailHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetUserByEmailQuery) -> Result<User, UserError> {
        let email = query.email.trim();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email").into());
        }

        self.store.get_user_by_email(email).await.map_err(|e| {
            if e.is_not_found() {
                UserError::NotFound {
                    email: email.to_string(),
                }
            } else {
                tracing::error!(error = %e, "Failed to get user by email");
                UserError::Store(e)
            }
        })
    }
}
