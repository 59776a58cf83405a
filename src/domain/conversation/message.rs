//! Message types for chat conversations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ConversationId, MessageId, Timestamp, ValidationError};

/// Who wrote a message.
///
/// Storage enforces exactly these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            "" => Err(ValidationError::empty_field("sender")),
            other => Err(ValidationError::invalid_format(
                "sender",
                format!("expected 'user' or 'assistant', got '{}'", other),
            )),
        }
    }
}

/// A persisted message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender: Sender,
    pub content: String,
    pub created_at: Timestamp,
}

/// A message waiting to be appended to a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub conversation_id: ConversationId,
    pub sender: Sender,
    pub content: String,
}

impl NewMessage {
    pub fn new(conversation_id: ConversationId, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            conversation_id,
            sender,
            content: content.into(),
        }
    }

    /// Creates an assistant reply for the conversation.
    pub fn assistant(conversation_id: ConversationId, content: impl Into<String>) -> Self {
        Self::new(conversation_id, Sender::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_parses_both_values() {
        assert_eq!("user".parse::<Sender>().unwrap(), Sender::User);
        assert_eq!("assistant".parse::<Sender>().unwrap(), Sender::Assistant);
    }

    #[test]
    fn sender_rejects_other_values() {
        assert!("system".parse::<Sender>().is_err());
        assert!("User".parse::<Sender>().is_err());
        assert_eq!(
            "".parse::<Sender>().unwrap_err(),
            ValidationError::empty_field("sender")
        );
    }

    #[test]
    fn sender_display_matches_storage_value() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Assistant.to_string(), "assistant");
    }

    #[test]
    fn assistant_constructor_sets_sender() {
        let conversation_id = ConversationId::new();
        let msg = NewMessage::assistant(conversation_id, "Drink water.");
        assert_eq!(msg.sender, Sender::Assistant);
        assert_eq!(msg.conversation_id, conversation_id);
        assert_eq!(msg.content, "Drink water.");
    }
}
