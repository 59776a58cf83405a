//! HTTP handlers for chat endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::{
    ConverseCommand, GetConversationMessagesQuery, ListUserConversationsQuery,
};

use super::dto::{
    ChatRequest, ChatResponse, ConversationThreadResponse, ConversationsQuery, MessageResponse,
    MessagesQuery,
};

/// POST /chat - Run one chat turn against the AI provider
pub async fn post_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let cmd = ConverseCommand {
        user_id: req.user_id,
        conversation_id: req.con_id,
        sender: req.sender,
        content: req.content,
    };

    let result = state.converse_handler().handle(cmd).await?;
    Ok(Json(ChatResponse::from(result)))
}

/// GET /chat/messages?conId= - Messages of one conversation in order
pub async fn get_messages(
    State(state): State<AppState>,
    Query(params): Query<MessagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetConversationMessagesQuery {
        conversation_id: params.con_id.unwrap_or_default(),
    };

    let messages = state.get_messages_handler().handle(query).await?;
    let response: Vec<MessageResponse> = messages.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET /conversations?userId= - A user's conversations with their messages
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(params): Query<ConversationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListUserConversationsQuery {
        user_id: params.user_id.unwrap_or_default(),
    };

    let threads = state.list_conversations_handler().handle(query).await?;
    let response: Vec<ConversationThreadResponse> = threads.into_iter().map(Into::into).collect();
    Ok(Json(response))
}
