//! Conversation repository.

use std::sync::Arc;

use crate::MemoryDatabase;
use crate::entities::Conversation;
use fanvault_common::{AppError, AppResult};

/// Conversation repository for direct messages.
#[derive(Clone)]
pub struct ConversationRepository {
    db: Arc<MemoryDatabase>,
}

impl ConversationRepository {
    /// Create a new conversation repository.
    #[must_use]
    pub const fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }

    /// List every conversation in inbox order.
    pub fn find_all(&self) -> AppResult<Vec<Conversation>> {
        Ok(self.db.conversations.read()?.clone())
    }

    /// Find a conversation by ID.
    pub fn find_by_id(&self, id: u64) -> AppResult<Option<Conversation>> {
        Ok(self
            .db
            .conversations
            .read()?
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    /// Find a conversation by ID, returning an error if not found.
    pub fn get_by_id(&self, id: u64) -> AppResult<Conversation> {
        self.find_by_id(id)?
            .ok_or(AppError::ConversationNotFound(id))
    }

    /// Sum of unread counts across every conversation.
    pub fn total_unread(&self) -> AppResult<u64> {
        Ok(self
            .db
            .conversations
            .read()?
            .iter()
            .map(|c| u64::from(c.unread_count))
            .sum())
    }

    /// Apply `f` to a conversation in place. Returns `None` if it does not exist.
    pub fn update<R>(
        &self,
        id: u64,
        f: impl FnOnce(&mut Conversation) -> R,
    ) -> AppResult<Option<R>> {
        let mut conversations = self.db.conversations.write()?;
        Ok(conversations.iter_mut().find(|c| c.id == id).map(f))
    }
}
