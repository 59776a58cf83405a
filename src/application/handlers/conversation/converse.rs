//! ConverseHandler - one chat turn: persist the user's message, ask the AI
//! provider for a reply and persist that reply.

use std::sync::Arc;

use super::errors::ConverseError;
use super::transcript::build_transcript;
use crate::domain::conversation::{NewMessage, Sender};
use crate::domain::foundation::{ConversationId, UserId, ValidationError};
use crate::ports::{AIClient, Store};

/// Command carrying raw client input for one chat turn.
#[derive(Debug, Clone)]
pub struct ConverseCommand {
    pub user_id: String,
    /// Existing conversation to continue. `None` or empty starts a new one.
    pub conversation_id: Option<String>,
    pub sender: String,
    pub content: String,
}

/// Result of a successful chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverseResult {
    /// Conversation the turn was recorded in (possibly newly created).
    pub conversation_id: ConversationId,
    pub ai_response: String,
}

/// Parsed form of [`ConverseCommand`].
struct ConverseInput {
    user_id: UserId,
    conversation_id: Option<ConversationId>,
    sender: Sender,
}

impl ConverseInput {
    fn parse(cmd: &ConverseCommand) -> Result<Self, ValidationError> {
        let raw_user_id = cmd.user_id.trim();
        if raw_user_id.is_empty() {
            return Err(ValidationError::empty_field("userId"));
        }
        let user_id = UserId::parse_field(raw_user_id, "userId")?;

        let conversation_id = match cmd.conversation_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(ConversationId::parse_field(raw, "conId")?),
        };

        let sender = cmd.sender.trim().parse()?;

        Ok(Self {
            user_id,
            conversation_id,
            sender,
        })
    }
}

/// Handler orchestrating a chat turn across the Store and the AI client.
///
/// Steps run sequentially and are not wrapped in a transaction: a failure
/// part-way leaves earlier writes in place.
pub struct ConverseHandler {
    store: Arc<dyn Store>,
    ai_client: Arc<dyn AIClient>,
}

impl ConverseHandler {
    pub fn new(store: Arc<dyn Store>, ai_client: Arc<dyn AIClient>) -> Self {
        Self { store, ai_client }
    }

    pub async fn handle(&self, cmd: ConverseCommand) -> Result<ConverseResult, ConverseError> {
        // 1. Validate input before touching any port
        let input = ConverseInput::parse(&cmd)?;

        // 2. Resolve or create the conversation
        let conversation_id = self
            .resolve_conversation(&input.user_id, input.conversation_id)
            .await?;

        // 3. Persist the caller's message
        self.store
            .create_message(NewMessage::new(conversation_id, input.sender, cmd.content))
            .await
            .map_err(|e| {
                tracing::error!(%conversation_id, error = %e, "Failed to save user message");
                e
            })?;

        // 4. Assemble the transcript from the full history
        let history = self
            .store
            .get_conversation_messages(&conversation_id)
            .await
            .map_err(|e| {
                tracing::error!(%conversation_id, error = %e, "Failed to load conversation history");
                e
            })?;
        let instruction = &self.ai_client.generation_config().instruction_text;
        let transcript = build_transcript(instruction, &history);

        // 5. Ask the provider
        let reply = self.ai_client.generate(&transcript).await.map_err(|e| {
            tracing::warn!(%conversation_id, error = %e, "AI provider call failed");
            e
        })?;

        // 6. Persist the assistant reply
        self.store
            .create_message(NewMessage::assistant(conversation_id, reply.clone()))
            .await
            .map_err(|e| {
                tracing::error!(%conversation_id, error = %e, "Failed to save AI message");
                e
            })?;

        tracing::debug!(
            %conversation_id,
            user_id = %input.user_id,
            history_len = history.len(),
            "Chat turn completed"
        );

        Ok(ConverseResult {
            conversation_id,
            ai_response: reply,
        })
    }

    /// Continues the requested conversation when the user owns it, otherwise
    /// starts a new one.
    async fn resolve_conversation(
        &self,
        user_id: &UserId,
        requested: Option<ConversationId>,
    ) -> Result<ConversationId, ConverseError> {
        if let Some(id) = requested {
            match self.store.get_conversation(&id, user_id).await {
                Ok(conversation) => return Ok(conversation.id),
                Err(e) if e.is_not_found() => {
                    tracing::info!(
                        requested_conversation_id = %id,
                        %user_id,
                        "Conversation not found for user, starting a new one"
                    );
                }
                Err(e) => {
                    tracing::error!(conversation_id = %id, error = %e, "Failed to fetch conversation");
                    return Err(e.into());
                }
            }
        }

        let id = self.store.create_conversation(user_id).await.map_err(|e| {
            tracing::error!(%user_id, error = %e, "Failed to create conversation");
            e
        })?;
        tracing::info!(conversation_id = %id, %user_id, "Created conversation");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::{InMemoryStore, StoreOperation};
    use crate::domain::conversation::Conversation;
    use crate::domain::foundation::Timestamp;
    use crate::domain::user::{User, UserRole};
    use crate::ports::{AIError, GenerationConfig, StoreError, TranscriptEntry, TranscriptRole};

    fn seeded_user(store: &InMemoryStore, email: &str) -> User {
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            username: "patient".to_string(),
            role: UserRole::Patient,
            created_at: Timestamp::now(),
        };
        store.seed_user(user.clone());
        user
    }

    fn handler(store: &Arc<InMemoryStore>, ai: &MockAIProvider) -> ConverseHandler {
        ConverseHandler::new(store.clone(), Arc::new(ai.clone()))
    }

    fn command(user_id: &UserId, conversation_id: Option<String>, content: &str) -> ConverseCommand {
        ConverseCommand {
            user_id: user_id.to_string(),
            conversation_id,
            sender: "user".to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn new_conversation_persists_user_then_assistant_message() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new().with_response("Hi");

        let result = handler(&store, &ai)
            .handle(command(&user.id, None, "Hello"))
            .await
            .unwrap();

        assert_eq!(result.ai_response, "Hi");
        assert_eq!(store.conversation_count(), 1);

        let messages = store.all_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].sender, Sender::Assistant);
        assert_eq!(messages[1].content, "Hi");
        assert!(messages.iter().all(|m| m.conversation_id == result.conversation_id));
    }

    #[tokio::test]
    async fn empty_conversation_id_starts_new_conversation() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new();

        handler(&store, &ai)
            .handle(command(&user.id, Some(String::new()), "Hello"))
            .await
            .unwrap();

        assert_eq!(store.conversation_count(), 1);
        assert!(!store.calls().contains(&StoreOperation::GetConversation));
    }

    #[tokio::test]
    async fn existing_conversation_sends_full_history() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new()
            .with_response("How long?")
            .with_response("See a doctor.")
            .with_generation_config(GenerationConfig::default().with_instruction("persona"));
        let handler = handler(&store, &ai);

        let first = handler
            .handle(command(&user.id, None, "Chest pain"))
            .await
            .unwrap();
        let second = handler
            .handle(command(
                &user.id,
                Some(first.conversation_id.to_string()),
                "Two days",
            ))
            .await
            .unwrap();

        assert_eq!(second.conversation_id, first.conversation_id);
        assert_eq!(store.conversation_count(), 1);

        let calls = ai.get_calls();
        assert_eq!(
            calls[1],
            vec![
                TranscriptEntry::new(TranscriptRole::User, "persona"),
                TranscriptEntry::new(TranscriptRole::User, "Chest pain"),
                TranscriptEntry::new(TranscriptRole::Model, "How long?"),
                TranscriptEntry::new(TranscriptRole::User, "Two days"),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_conversation_id_falls_back_to_new_conversation() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new();
        let unknown = ConversationId::new();

        let result = handler(&store, &ai)
            .handle(command(&user.id, Some(unknown.to_string()), "Hello"))
            .await
            .unwrap();

        assert_ne!(result.conversation_id, unknown);
        assert_eq!(store.conversation_count(), 1);
    }

    #[tokio::test]
    async fn foreign_conversation_id_falls_back_to_new_conversation() {
        let store = Arc::new(InMemoryStore::new());
        let owner = seeded_user(&store, "owner@example.com");
        let intruder = seeded_user(&store, "intruder@example.com");
        let foreign = Conversation::start(owner.id);
        store.seed_conversation(foreign.clone());
        let ai = MockAIProvider::new();

        let result = handler(&store, &ai)
            .handle(command(&intruder.id, Some(foreign.id.to_string()), "Hello"))
            .await
            .unwrap();

        assert_ne!(result.conversation_id, foreign.id);
        assert!(store
            .all_messages()
            .iter()
            .all(|m| m.conversation_id != foreign.id));
    }

    #[tokio::test]
    async fn provider_failure_keeps_user_message_only() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new().with_error(AIError::status(500, "internal"));

        let err = handler(&store, &ai)
            .handle(command(&user.id, None, "Hello"))
            .await
            .unwrap_err();

        assert_eq!(err, ConverseError::Provider(AIError::status(500, "internal")));
        let messages = store.all_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::User);
    }

    #[tokio::test]
    async fn malformed_user_id_fails_before_any_port_call() {
        let store = Arc::new(InMemoryStore::new());
        let ai = MockAIProvider::new();
        let cmd = ConverseCommand {
            user_id: "not-a-uuid".to_string(),
            conversation_id: None,
            sender: "user".to_string(),
            content: "Hello".to_string(),
        };

        let err = handler(&store, &ai).handle(cmd).await.unwrap_err();

        assert!(matches!(err, ConverseError::Validation(ref v) if v.field() == "userId"));
        assert_eq!(store.call_count(), 0);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_conversation_id_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new();

        let err = handler(&store, &ai)
            .handle(command(&user.id, Some("abc".to_string()), "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConverseError::Validation(ref v) if v.field() == "conId"));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_sender_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new();
        let mut cmd = command(&user.id, None, "Hello");
        cmd.sender = "doctor".to_string();

        let err = handler(&store, &ai).handle(cmd).await.unwrap_err();

        assert!(matches!(err, ConverseError::Validation(ref v) if v.field() == "sender"));
        assert_eq!(store.call_count(), 0);
        assert_eq!(store.conversation_count(), 0);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_content_is_accepted() {
        let store = Arc::new(InMemoryStore::new());
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new();

        handler(&store, &ai)
            .handle(command(&user.id, None, ""))
            .await
            .unwrap();

        assert_eq!(store.all_messages()[0].content, "");
    }

    #[tokio::test]
    async fn conversation_lookup_failure_is_fatal() {
        let store = Arc::new(InMemoryStore::new().with_failure(
            StoreOperation::GetConversation,
            StoreError::database("connection reset"),
        ));
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new();

        let err = handler(&store, &ai)
            .handle(command(&user.id, Some(ConversationId::new().to_string()), "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConverseError::Store(_)));
        assert_eq!(store.conversation_count(), 0);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn assistant_save_failure_leaves_user_message() {
        let store = Arc::new(InMemoryStore::new().with_failure_after(
            StoreOperation::CreateMessage,
            1,
            StoreError::database("disk full"),
        ));
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new().with_response("Hi");

        let err = handler(&store, &ai)
            .handle(command(&user.id, None, "Hello"))
            .await
            .unwrap_err();

        assert_eq!(err, ConverseError::Store(StoreError::database("disk full")));
        assert_eq!(ai.call_count(), 1);
        assert_eq!(store.all_messages().len(), 1);
    }

    #[tokio::test]
    async fn user_message_save_failure_skips_provider() {
        let store = Arc::new(InMemoryStore::new().with_failure(
            StoreOperation::CreateMessage,
            StoreError::database("disk full"),
        ));
        let user = seeded_user(&store, "a@example.com");
        let ai = MockAIProvider::new();

        let err = handler(&store, &ai)
            .handle(command(&user.id, None, "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConverseError::Store(_)));
        assert_eq!(ai.call_count(), 0);
        // The freshly created conversation is not rolled back.
        assert_eq!(store.conversation_count(), 1);
    }
}
