//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::{
    ConverseHandler, CreateUserHandler, GetConversationMessagesHandler, GetUserByEmailHandler,
    ListUserConversationsHandler,
};
use crate::ports::{AIClient, Store};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; handlers are created on demand from the
/// Arc-wrapped ports.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub ai_client: Arc<dyn AIClient>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, ai_client: Arc<dyn AIClient>) -> Self {
        Self { store, ai_client }
    }

    pub fn converse_handler(&self) -> ConverseHandler {
        ConverseHandler::new(self.store.clone(), self.ai_client.clone())
    }

    pub fn get_messages_handler(&self) -> GetConversationMessagesHandler {
        GetConversationMessagesHandler::new(self.store.clone())
    }

    pub fn list_conversations_handler(&self) -> ListUserConversationsHandler {
        ListUserConversationsHandler::new(self.store.clone())
    }

    pub fn create_user_handler(&self) -> CreateUserHandler {
        CreateUserHandler::new(self.store.clone())
    }

    pub fn get_user_handler(&self) -> GetUserByEmailHandler {
        GetUserByEmailHandler::new(self.store.clone())
    }
}
