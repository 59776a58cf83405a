//! Conversation handlers.
//!
//! - `ConverseHandler` - one chat turn against the AI provider
//! - `GetConversationMessagesHandler` - messages of a conversation
//! - `ListUserConversationsHandler` - a user's conversations as threads

mod converse;
mod errors;
mod get_messages;
mod list_conversations;
mod transcript;

pub use converse::{ConverseCommand, ConverseHandler, ConverseResult};
pub use errors::{ConversationQueryError, ConverseError};
pub use get_messages::{GetConversationMessagesHandler, GetConversationMessagesQuery};
pub use list_conversations::{ListUserConversationsHandler, ListUserConversationsQuery};
pub use transcript::{build_transcript, transcript_role};
