//! PostgreSQL implementation of the Store port.
//!
//! Ids and timestamps are assigned by the database (see
//! `migrations/0001_initial_schema.sql`) and read back with `RETURNING`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::conversation::{
    Conversation, ConversationEntry, EntryMessage, Message, NewMessage, Sender,
};
use crate::domain::foundation::{ConversationId, MessageId, Timestamp, UserId};
use crate::domain::user::{NewUser, User, UserRole};
use crate::ports::{Store, StoreError};

/// PostgreSQL implementation of Store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgresStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, username, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, username, role, created_at
            "#,
        )
        .bind(user.email())
        .bind(user.username())
        .bind(user.role().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict(format!("user with email {} already exists", user.email()))
            } else {
                db_error("Failed to insert user", e)
            }
        })?;

        row_to_user(&row)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, username, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user", e))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(StoreError::not_found("user")),
        }
    }

    async fn create_conversation(&self, user_id: &UserId) -> Result<ConversationId, StoreError> {
        let row = sqlx::query("INSERT INTO conversations (user_id) VALUES ($1) RETURNING id")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to insert conversation", e))?;

        let id: Uuid = column(&row, "id")?;
        Ok(ConversationId::from_uuid(id))
    }

    async fn get_conversation(
        &self,
        id: &ConversationId,
        user_id: &UserId,
    ) -> Result<Conversation, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, created_at
            FROM conversations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch conversation", e))?;

        let Some(row) = row else {
            return Err(StoreError::not_found("conversation"));
        };

        let id: Uuid = column(&row, "id")?;
        let owner: Uuid = column(&row, "user_id")?;
        let created_at: DateTime<Utc> = column(&row, "created_at")?;

        Ok(Conversation {
            id: ConversationId::from_uuid(id),
            user_id: UserId::from_uuid(owner),
            created_at: Timestamp::from_datetime(created_at),
        })
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (conversation_id, sender, content)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(message.conversation_id.as_uuid())
        .bind(message.sender.as_str())
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert message", e))?;

        let id: Uuid = column(&row, "id")?;
        let created_at: DateTime<Utc> = column(&row, "created_at")?;

        Ok(Message {
            id: MessageId::from_uuid(id),
            conversation_id: message.conversation_id,
            sender: message.sender,
            content: message.content,
            created_at: Timestamp::from_datetime(created_at),
        })
    }

    async fn get_conversation_messages(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, sender, content, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch messages", e))?;

        rows.iter()
            .map(|row| {
                let message_id: Uuid = column(row, "id")?;
                let created_at: DateTime<Utc> = column(row, "created_at")?;
                Ok(Message {
                    id: MessageId::from_uuid(message_id),
                    conversation_id: *id,
                    sender: parse_sender(row, "sender")?,
                    content: column(row, "content")?,
                    created_at: Timestamp::from_datetime(created_at),
                })
            })
            .collect()
    }

    async fn list_full_conversations_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConversationEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id AS conversation_id,
                   c.created_at AS conversation_created_at,
                   m.id AS message_id,
                   m.sender,
                   m.content,
                   m.created_at AS message_created_at
            FROM conversations c
            LEFT JOIN messages m ON m.conversation_id = c.id
            WHERE c.user_id = $1
            ORDER BY c.created_at DESC, c.id, m.seq ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list conversations", e))?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_user(row: &PgRow) -> Result<User, StoreError> {
    let id: Uuid = column(row, "id")?;
    let role: String = column(row, "role")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(User {
        id: UserId::from_uuid(id),
        email: column(row, "email")?,
        username: column(row, "username")?,
        role: role
            .parse::<UserRole>()
            .map_err(|e| StoreError::database(format!("Invalid role in database: {}", e)))?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_entry(row: &PgRow) -> Result<ConversationEntry, StoreError> {
    let conversation_id: Uuid = column(row, "conversation_id")?;
    let conversation_created_at: DateTime<Utc> = column(row, "conversation_created_at")?;
    let message_id: Option<Uuid> = column(row, "message_id")?;

    let message = match message_id {
        Some(id) => {
            let created_at: DateTime<Utc> = column(row, "message_created_at")?;
            Some(EntryMessage {
                id: MessageId::from_uuid(id),
                sender: parse_sender(row, "sender")?,
                content: column(row, "content")?,
                created_at: Timestamp::from_datetime(created_at),
            })
        }
        None => None,
    };

    Ok(ConversationEntry {
        conversation_id: ConversationId::from_uuid(conversation_id),
        conversation_created_at: Timestamp::from_datetime(conversation_created_at),
        message,
    })
}

fn parse_sender(row: &PgRow, name: &str) -> Result<Sender, StoreError> {
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|e| StoreError::database(format!("Invalid sender in database: {}", e)))
}

/// Reads a column, reporting decode failures as database errors.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| StoreError::database(format!("Failed to get {}: {}", name, e)))
}

fn db_error(context: &str, e: sqlx::Error) -> StoreError {
    StoreError::database(format!("{}: {}", context, e))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
