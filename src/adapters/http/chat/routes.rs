//! Axum router configuration for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_messages, list_conversations, post_chat};
use crate::adapters::http::state::AppState;

/// Create the chat router.
///
/// # Routes
///
/// - `POST /chat` - Send a message and receive the AI reply
/// - `GET /chat/messages?conId=` - Messages of a conversation
/// - `GET /conversations?userId=` - Conversations of a user, newest first
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(post_chat))
        .route("/chat/messages", get(get_messages))
        .route("/conversations", get(list_conversations))
}
