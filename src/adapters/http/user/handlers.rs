//! HTTP handlers for user endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::{CreateUserCommand, GetUserByEmailQuery};

use super::dto::{CreateUserRequest, CreateUserResponse, UserByEmailQuery, UserResponse};

/// POST /user - Register a user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let cmd = CreateUserCommand {
        email: req.email,
        username: req.username,
        role: req.role,
    };

    state.create_user_handler().handle(cmd).await?;
    Ok(Json(CreateUserResponse::created()))
}

/// GET /user/?email= - Look up a user by email
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(params): Query<UserByEmailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetUserByEmailQuery {
        email: params.email.unwrap_or_default(),
    };

    let user = state.get_user_handler().handle(query).await?;
    Ok(Json(UserResponse::from(user)))
}
