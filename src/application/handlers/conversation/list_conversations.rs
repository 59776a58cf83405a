//! ListUserConversationsHandler - Query handler for a user's conversation
//! threads with their messages.

use std::sync::Arc;

use super::errors::ConversationQueryError;
use crate::domain::conversation::{group_into_threads, ConversationThread};
use crate::domain::foundation::{UserId, ValidationError};
use crate::ports::Store;

/// Query for every conversation of a user.
#[derive(Debug, Clone)]
pub struct ListUserConversationsQuery {
    pub user_id: String,
}

/// Handler grouping the Store's joined rows into threads, newest first.
pub struct ListUserConversationsHandler {
    store: Arc<dyn Store>,
}

impl ListUserConversationsHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListUserConversationsQuery,
    ) -> Result<Vec<ConversationThread>, ConversationQueryError> {
        let raw = query.user_id.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("userId").into());
        }
        let user_id = UserId::parse_field(raw, "userId")?;

        let entries = self
            .store
            .list_full_conversations_by_user(&user_id)
            .await
            .map_err(|e| {
                tracing::error!(%user_id, error = %e, "Failed to list conversations");
                e
            })?;

        Ok(group_into_threads(entries))
    }
}
