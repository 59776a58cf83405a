//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (chat turns, registration) and queries (lookups, listings) each
//! get their own handler.

pub mod handlers;

pub use handlers::{
    ConversationQueryError, ConverseCommand, ConverseError, ConverseHandler, ConverseResult,
    CreateUserCommand, CreateUserHandler, GetConversationMessagesHandler,
    GetConversationMessagesQuery, GetUserByEmailHandler, GetUserByEmailQuery,
    ListUserConversationsHandler, ListUserConversationsQuery, UserError,
};
