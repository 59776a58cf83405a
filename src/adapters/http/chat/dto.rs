//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::ConverseResult;
use crate::domain::conversation::{ConversationThread, Message, Sender, ThreadMessage};

/// Confirmation text returned with every processed chat turn.
pub const CHAT_PROCESSED_MESSAGE: &str = "Message processed successfully";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Conversation to continue; omitted or empty starts a new one.
    #[serde(default)]
    pub con_id: Option<String>,
}

fn default_sender() -> String {
    Sender::User.as_str().to_string()
}

/// Query of `GET /chat/messages`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub con_id: Option<String>,
}

/// Query of `GET /conversations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationsQuery {
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub conversation_id: String,
    pub ai_response: String,
    pub message: String,
}

impl From<ConverseResult> for ChatResponse {
    fn from(result: ConverseResult) -> Self {
        Self {
            conversation_id: result.conversation_id.to_string(),
            ai_response: result.ai_response,
            message: CHAT_PROCESSED_MESSAGE.to_string(),
        }
    }
}

/// A stored message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender: Sender,
    pub content: String,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender: message.sender,
            content: message.content,
            created_at: message.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// A conversation with its messages, as the frontend renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationThreadResponse {
    pub id: String,
    pub title: String,
    pub messages: Vec<ThreadMessageResponse>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadMessageResponse {
    pub sender: Sender,
    pub text: String,
}

impl From<ThreadMessage> for ThreadMessageResponse {
    fn from(message: ThreadMessage) -> Self {
        Self {
            sender: message.sender,
            text: message.text,
        }
    }
}

impl From<ConversationThread> for ConversationThreadResponse {
    fn from(thread: ConversationThread) -> Self {
        Self {
            id: thread.id.to_string(),
            title: thread.title,
            messages: thread.messages.into_iter().map(Into::into).collect(),
            created_at: thread.created_at.as_datetime().to_rfc3339(),
        }
    }
}
