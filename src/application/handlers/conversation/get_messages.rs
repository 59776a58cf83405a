//! GetConversationMessagesHandler - Query handler for a conversation's messages.

use std::sync::Arc;

use super::errors::ConversationQueryError;
use crate::domain::conversation::Message;
use crate::domain::foundation::{ConversationId, ValidationError};
use crate::ports::Store;

/// Query for all messages of one conversation.
#[derive(Debug, Clone)]
pub struct GetConversationMessagesQuery {
    pub conversation_id: String,
}

/// Handler returning messages in insertion order.
///
/// An unknown conversation yields an empty list.
pub struct GetConversationMessagesHandler {
    store: Arc<dyn Store>,
}

impl GetConversationMessagesHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetConversationMessagesQuery,
    ) -> Result<Vec<Message>, ConversationQueryError> {
        let raw = query.conversation_id.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("conId").into());
        }
        let conversation_id = ConversationId::parse_field(raw, "conId")?;

        let messages = self
            .store
            .get_conversation_messages(&conversation_id)
            .await
            .map_err(|e| {
                tracing::error!(%conversation_id, error = %e, "Failed to get conversation messages");
                e
            })?;

        Ok(messages)
    }
}
