//! HTTP DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserRole};

/// Body of `POST /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
}

/// Query of `GET /user/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserByEmailQuery {
    pub email: Option<String>,
}

/// Response of `POST /user`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    pub success: bool,
    pub message: String,
}

impl CreateUserResponse {
    pub fn created() -> Self {
        Self {
            success: true,
            message: "user created successfully".to_string(),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            role: user.role,
            created_at: user.created_at.as_datetime().to_rfc3339(),
        }
    }
}
