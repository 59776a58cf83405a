//! Conversation entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, Timestamp, UserId};

/// A conversation owned by exactly one user.
///
/// Messages are stored separately and appended in order; a conversation with
/// no messages is a valid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub user_id: UserId,
    pub created_at: Timestamp,
}

impl Conversation {
    /// Creates a fresh conversation for the given owner.
    pub fn start(user_id: UserId) -> Self {
        Self {
            id: ConversationId::new(),
            user_id,
            created_at: Timestamp::now(),
        }
    }

    /// Returns true if `user_id` owns this conversation.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_assigns_owner() {
        let owner = UserId::new();
        let conversation = Conversation::start(owner);
        assert!(conversation.is_owned_by(&owner));
        assert!(!conversation.is_owned_by(&UserId::new()));
    }
}
