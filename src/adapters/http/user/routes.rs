//! Axum router configuration for user endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_user, get_user_by_email};
use crate::adapters::http::state::AppState;

/// Create the user router.
///
/// # Routes
///
/// - `POST /user` - Register a user
/// - `GET /user/?email=` - Look up a user by email (also served without the
///   trailing slash)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user).get(get_user_by_email))
        .route("/user/", get(get_user_by_email))
}
