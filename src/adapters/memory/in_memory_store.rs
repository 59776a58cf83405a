//! In-memory Store for tests and local runs without PostgreSQL.
//!
//! Mirrors the relational constraints of the real schema: unique emails,
//! conversations must reference an existing user, messages must reference an
//! existing conversation, and owner-scoped conversation lookups.
//!
//! # Features
//!
//! - Call counting for verifying that no store access happened
//! - Error injection per operation, optionally after N successful calls
//!
//! # Example
//!
//! ```ignore
//! let store = InMemoryStore::new()
//!     .with_failure(StoreOperation::CreateMessage, StoreError::database("disk full"));
//!
//! let user = store.create_user(new_user).await?;
//! assert_eq!(store.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::conversation::{
    Conversation, ConversationEntry, EntryMessage, Message, NewMessage,
};
use crate::domain::foundation::{ConversationId, MessageId, Timestamp, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::{Store, StoreError};

/// Store operations, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    CreateUser,
    GetUserByEmail,
    CreateConversation,
    GetConversation,
    CreateMessage,
    GetConversationMessages,
    ListFullConversations,
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    /// Successful calls to allow before failing.
    remaining_successes: usize,
    error: StoreError,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    failures: HashMap<StoreOperation, InjectedFailure>,
    calls: Vec<StoreOperation>,
}

/// Thread-safe in-memory implementation of [`Store`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call to `operation` fail with `error`.
    pub fn with_failure(self, operation: StoreOperation, error: StoreError) -> Self {
        self.with_failure_after(operation, 0, error)
    }

    /// Lets `successes` calls to `operation` through, then fails with `error`.
    pub fn with_failure_after(
        self,
        operation: StoreOperation,
        successes: usize,
        error: StoreError,
    ) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.failures.insert(
                operation,
                InjectedFailure {
                    remaining_successes: successes,
                    error,
                },
            );
        }
        self
    }

    /// Inserts an existing user directly, bypassing call tracking.
    pub fn seed_user(&self, user: User) {
        if let Ok(mut state) = self.state.lock() {
            state.users.push(user);
        }
    }

    /// Inserts an existing conversation directly, bypassing call tracking.
    pub fn seed_conversation(&self, conversation: Conversation) {
        if let Ok(mut state) = self.state.lock() {
            state.conversations.push(conversation);
        }
    }

    /// Total number of Store calls made.
    pub fn call_count(&self) -> usize {
        self.state.lock().map(|s| s.calls.len()).unwrap_or(0)
    }

    /// Recorded Store calls in order.
    pub fn calls(&self) -> Vec<StoreOperation> {
        self.state.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    /// Number of conversations held.
    pub fn conversation_count(&self) -> usize {
        self.state.lock().map(|s| s.conversations.len()).unwrap_or(0)
    }

    /// Snapshot of every stored message, in insertion order.
    pub fn all_messages(&self) -> Vec<Message> {
        self.state.lock().map(|s| s.messages.clone()).unwrap_or_default()
    }

    /// Locks the state, records the call and applies any injected failure.
    fn begin(&self, operation: StoreOperation) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| StoreError::database("in-memory store lock poisoned"))?;

        state.calls.push(operation);

        if let Some(failure) = state.failures.get_mut(&operation) {
            if failure.remaining_successes == 0 {
                return Err(failure.error.clone());
            }
            failure.remaining_successes -= 1;
        }

        Ok(state)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.begin(StoreOperation::CreateUser)?;

        if state.users.iter().any(|u| u.email == user.email()) {
            return Err(StoreError::Conflict(format!(
                "user with email {} already exists",
                user.email()
            )));
        }

        let created = User {
            id: UserId::new(),
            email: user.email().to_string(),
            username: user.username().to_string(),
            role: user.role(),
            created_at: Timestamp::now(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let state = self.begin(StoreOperation::GetUserByEmail)?;
        state
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user"))
    }

    async fn create_conversation(&self, user_id: &UserId) -> Result<ConversationId, StoreError> {
        let mut state = self.begin(StoreOperation::CreateConversation)?;

        if !state.users.iter().any(|u| &u.id == user_id) {
            return Err(StoreError::database(format!(
                "conversation owner {} does not exist",
                user_id
            )));
        }

        let conversation = Conversation::start(*user_id);
        let id = conversation.id;
        state.conversations.push(conversation);
        Ok(id)
    }

    async fn get_conversation(
        &self,
        id: &ConversationId,
        user_id: &UserId,
    ) -> Result<Conversation, StoreError> {
        let state = self.begin(StoreOperation::GetConversation)?;
        state
            .conversations
            .iter()
            .find(|c| &c.id == id && c.is_owned_by(user_id))
            .cloned()
            .ok_or_else(|| StoreError::not_found("conversation"))
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        let mut state = self.begin(StoreOperation::CreateMessage)?;

        if !state
            .conversations
            .iter()
            .any(|c| c.id == message.conversation_id)
        {
            return Err(StoreError::database(format!(
                "conversation {} does not exist",
                message.conversation_id
            )));
        }

        let created = Message {
            id: MessageId::new(),
            conversation_id: message.conversation_id,
            sender: message.sender,
            content: message.content,
            created_at: Timestamp::now(),
        };
        state.messages.push(created.clone());
        Ok(created)
    }

    async fn get_conversation_messages(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<Message>, StoreError> {
        let state = self.begin(StoreOperation::GetConversationMessages)?;
        Ok(state
            .messages
            .iter()
            .filter(|m| &m.conversation_id == id)
            .cloned()
            .collect())
    }

    async fn list_full_conversations_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConversationEntry>, StoreError> {
        let state = self.begin(StoreOperation::ListFullConversations)?;

        let mut entries = Vec::new();
        // Newest first: conversations are appended in creation order.
        for conversation in state.conversations.iter().rev() {
            if !conversation.is_owned_by(user_id) {
                continue;
            }

            let mut has_messages = false;
            for message in state
                .messages
                .iter()
                .filter(|m| m.conversation_id == conversation.id)
            {
                has_messages = true;
                entries.push(ConversationEntry {
                    conversation_id: conversation.id,
                    conversation_created_at: conversation.created_at,
                    message: Some(EntryMessage {
                        id: message.id,
                        sender: message.sender,
                        content: message.content.clone(),
                        created_at: message.created_at,
                    }),
                });
            }

            if !has_messages {
                entries.push(ConversationEntry {
                    conversation_id: conversation.id,
                    conversation_created_at: conversation.created_at,
                    message: None,
                });
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Sender;
    use crate::domain::user::UserRole;

    fn new_user(email: &str) -> NewUser {
        NewUser::new(email, "tester", UserRole::Patient).unwrap()
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let store = InMemoryStore::new();
        store.create_user(new_user("a@example.com")).await.unwrap();

        let err = store.create_user(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_user_by_email_finds_registered_user() {
        let store = InMemoryStore::new();
        let created = store.create_user(new_user("b@example.com")).await.unwrap();

        let found = store.get_user_by_email("b@example.com").await.unwrap();
        assert_eq!(found, created);
        assert!(store
            .get_user_by_email("missing@example.com")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn create_conversation_requires_existing_owner() {
        let store = InMemoryStore::new();
        let err = store.create_conversation(&UserId::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn get_conversation_is_scoped_to_owner() {
        let store = InMemoryStore::new();
        let owner = store.create_user(new_user("c@example.com")).await.unwrap();
        let other = store.create_user(new_user("d@example.com")).await.unwrap();
        let id = store.create_conversation(&owner.id).await.unwrap();

        assert!(store.get_conversation(&id, &owner.id).await.is_ok());
        assert!(store
            .get_conversation(&id, &other.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn messages_come_back_in_insertion_order() {
        let store = InMemoryStore::new();
        let owner = store.create_user(new_user("e@example.com")).await.unwrap();
        let id = store.create_conversation(&owner.id).await.unwrap();

        for (sender, text) in [(Sender::User, "one"), (Sender::Assistant, "two"), (Sender::User, "three")] {
            store
                .create_message(NewMessage::new(id, sender, text))
                .await
                .unwrap();
        }

        let texts: Vec<_> = store
            .get_conversation_messages(&id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn listing_is_newest_first_with_empty_rows() {
        let store = InMemoryStore::new();
        let owner = store.create_user(new_user("f@example.com")).await.unwrap();
        let older = store.create_conversation(&owner.id).await.unwrap();
        let newer = store.create_conversation(&owner.id).await.unwrap();
        store
            .create_message(NewMessage::new(older, Sender::User, "hello"))
            .await
            .unwrap();

        let entries = store.list_full_conversations_by_user(&owner.id).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].conversation_id, newer);
        assert!(entries[0].message.is_none());
        assert_eq!(entries[1].conversation_id, older);
        assert!(entries[1].message.is_some());
    }

    #[tokio::test]
    async fn injected_failure_after_successes() {
        let store = InMemoryStore::new().with_failure_after(
            StoreOperation::GetUserByEmail,
            1,
            StoreError::database("boom"),
        );

        assert!(store.get_user_by_email("x@example.com").await.unwrap_err().is_not_found());
        let err = store.get_user_by_email("x@example.com").await.unwrap_err();
        assert_eq!(err, StoreError::database("boom"));
        assert_eq!(store.call_count(), 2);
    }
}
