//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! Store and AIClient ports.

pub mod conversation;
pub mod user;

pub use conversation::{
    ConversationQueryError, ConverseCommand, ConverseError, ConverseHandler, ConverseResult,
    GetConversationMessagesHandler, GetConversationMessagesQuery, ListUserConversationsHandler,
    ListUserConversationsQuery,
};
pub use user::{
    CreateUserCommand, CreateUserHandler, GetUserByEmailHandler, GetUserByEmailQuery, UserError,
};
