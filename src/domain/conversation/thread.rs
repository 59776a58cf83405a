//! Grouped conversation listing.
//!
//! The bulk listing query is an outer join of conversations and messages, one
//! row per message (or a single message-less row for an empty conversation).
//! [`group_into_threads`] folds those rows back into nested conversations.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::foundation::{ConversationId, MessageId, Timestamp};

use super::Sender;

/// Title used for conversations that have no messages yet.
pub const EMPTY_CONVERSATION_TITLE: &str = "Empty Conversation";

/// One row of the conversations-with-messages join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub conversation_id: ConversationId,
    pub conversation_created_at: Timestamp,
    /// Absent when the conversation has no messages.
    pub message: Option<EntryMessage>,
}

/// Message columns of a [`ConversationEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    pub created_at: Timestamp,
}

/// A conversation with its messages, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationThread {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<ThreadMessage>,
    pub created_at: Timestamp,
}

/// A message inside a [`ConversationThread`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadMessage {
    pub sender: Sender,
    pub text: String,
}

/// Groups join rows by conversation id.
///
/// Conversations appear in order of first appearance in `entries`, and each
/// conversation's messages keep the row order. Rows without a message (or with
/// a nil message id) contribute the conversation but no message. The title is
/// the text of the first message, or [`EMPTY_CONVERSATION_TITLE`].
pub fn group_into_threads<I>(entries: I) -> Vec<ConversationThread>
where
    I: IntoIterator<Item = ConversationEntry>,
{
    let mut threads: Vec<ConversationThread> = Vec::new();
    let mut index: HashMap<ConversationId, usize> = HashMap::new();

    for entry in entries {
        let position = *index.entry(entry.conversation_id).or_insert_with(|| {
            threads.push(ConversationThread {
                id: entry.conversation_id,
                title: String::new(),
                messages: Vec::new(),
                created_at: entry.conversation_created_at,
            });
            threads.len() - 1
        });

        if let Some(message) = entry.message {
            if message.id.as_uuid().is_nil() {
                continue;
            }
            threads[position].messages.push(ThreadMessage {
                sender: message.sender,
                text: message.content,
            });
        }
    }

    for thread in &mut threads {
        thread.title = match thread.messages.first() {
            Some(first) => first.text.clone(),
            None => EMPTY_CONVERSATION_TITLE.to_string(),
        };
    }

    threads
}
