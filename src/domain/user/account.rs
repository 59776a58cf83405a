//! User account types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Role a user plays in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Patient,
    Doctor,
    Admin,
}

impl UserRole {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Patient => "patient",
            UserRole::Doctor => "doctor",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(UserRole::Patient),
            "doctor" => Ok(UserRole::Doctor),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// A registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: Timestamp,
}

/// Validated input for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: String,
    username: String,
    role: UserRole,
}

impl NewUser {
    /// Creates a new registration request, checking basic field formats.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if email or username is blank
    /// - `InvalidFormat` if the email has no `@`
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();
        let username = username.into().trim().to_string();

        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        if username.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }

        Ok(Self {
            email,
            username,
            role,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_values() {
        assert_eq!("patient".parse::<UserRole>().unwrap(), UserRole::Patient);
        assert_eq!("doctor".parse::<UserRole>().unwrap(), UserRole::Doctor);
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
    }

    #[test]
    fn role_rejects_unknown_value() {
        let err = "nurse".parse::<UserRole>().unwrap_err();
        assert_eq!(err.field(), "role");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Doctor).unwrap();
        assert_eq!(json, "\"doctor\"");
    }

    #[test]
    fn new_user_trims_fields() {
        let user = NewUser::new("  ana@example.com ", " ana ", UserRole::Patient).unwrap();
        assert_eq!(user.email(), "ana@example.com");
        assert_eq!(user.username(), "ana");
        assert_eq!(user.role(), UserRole::Patient);
    }

    #[test]
    fn new_user_rejects_email_without_at() {
        let err = NewUser::new("ana.example.com", "ana", UserRole::Patient).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn new_user_rejects_blank_username() {
        let err = NewUser::new("ana@example.com", "   ", UserRole::Patient).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("username"));
    }
}
