//! Conversation domain module.
//!
//! A conversation belongs to one user and holds an append-only sequence of
//! messages exchanged between the user and the assistant.

mod conversation;
mod message;
mod persona;
mod thread;

pub use conversation::Conversation;
pub use message::{Message, NewMessage, Sender};
pub use persona::CARDIOLOGIST_INSTRUCTION;
pub use thread::{
    group_into_threads, ConversationEntry, ConversationThread, EntryMessage, ThreadMessage,
    EMPTY_CONVERSATION_TITLE,
};
