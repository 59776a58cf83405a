//! Store port - persistence for users, conversations and messages.
//!
//! A single narrow capability interface over the four tables the application
//! uses. Implementations must be safe for concurrent use (e.g. a pooled
//! database connection).
//!
//! # Contract
//!
//! - `get_conversation` reports a missing or foreign-owned conversation as
//!   [`StoreError::NotFound`], never as [`StoreError::Database`]
//! - Messages are append-only and returned in insertion order

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::{Conversation, ConversationEntry, Message, NewMessage};
use crate::domain::foundation::{ConversationId, UserId};
use crate::domain::user::{NewUser, User};

/// Port for all persistence used by the application layer.
#[async_trait]
pub trait Store: Send + Sync {
    /// Register a new user.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already registered
    /// - `Database` on persistence failure
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Find a user by email address.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this email
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Create an empty conversation owned by `user_id`.
    async fn create_conversation(&self, user_id: &UserId) -> Result<ConversationId, StoreError>;

    /// Fetch a conversation scoped to its owner.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the conversation does not exist or belongs to another user
    /// - `Database` on any other failure
    async fn get_conversation(
        &self,
        id: &ConversationId,
        user_id: &UserId,
    ) -> Result<Conversation, StoreError>;

    /// Append a message to a conversation.
    async fn create_message(&self, message: NewMessage) -> Result<Message, StoreError>;

    /// All messages of a conversation in insertion order.
    async fn get_conversation_messages(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<Message>, StoreError>;

    /// Every conversation of a user joined with its messages.
    ///
    /// Rows are ordered newest conversation first, then by message order.
    /// Conversations without messages produce one row with no message.
    async fn list_full_conversations_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConversationEntry>, StoreError>;
}

/// Store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested row does not exist (for this owner).
    #[error("{entity} not found")]
    NotFound {
        /// Kind of row that was looked up.
        entity: &'static str,
    },

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// Any other persistence failure.
    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Creates a not found error.
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Returns true if this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
