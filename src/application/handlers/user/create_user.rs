//! CreateUserHandler - Command handler for registering users.

use std::sync::Arc;

use super::errors::UserError;
use crate::domain::user::{NewUser, User, UserRole};
use crate::ports::{Store, StoreError};

/// Command to register a user from raw client input.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub email: String,
    pub username: String,
    /// `patient`, `doctor` or `admin`. Blank means `patient`.
    pub role: String,
}

/// Handler for registering users.
pub struct CreateUserHandler {
    store: Arc<dyn Store>,
}

impl CreateUserHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateUserCommand) -> Result<User, UserError> {
        let role = match cmd.role.trim() {
            "" => UserRole::Patient,
            raw => raw.parse()?,
        };
        let new_user = NewUser::new(cmd.email, cmd.username, role)?;

        match self.store.create_user(new_user.clone()).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, role = %user.role, "User created");
                Ok(user)
            }
            Err(StoreError::Conflict(_)) => Err(UserError::AlreadyExists {
                email: new_user.email().to_string(),
            }),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create user");
                Err(UserError::Store(e))
            }
        }
    }
}
