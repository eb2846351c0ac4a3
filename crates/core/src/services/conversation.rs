//! Conversation service for direct messages.

use chrono::Local;
use fanvault_common::{AppError, AppResult, Price};
use fanvault_db::{
    entities::{Conversation, Message, Sender},
    repositories::{ConversationRepository, CreatorRepository},
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Inbox row for one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub conversation_id: u64,
    pub creator_id: u64,
    pub creator_name: String,
    pub creator_picture: String,
    pub creator_online: bool,
    pub last_message: Option<String>,
    pub last_timestamp: Option<String>,
    pub unread_count: u32,
}

/// Result of a send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was appended.
    Sent(Message),
    /// Empty input was dropped without touching the conversation.
    Skipped,
    /// The conversation does not exist.
    NotFound,
}

/// Result of an unlock attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The message moved from locked to unlocked.
    Unlocked(Message),
    /// The message exists but was not locked: free media, text, or already unlocked.
    Unchanged(Message),
    /// The conversation or message does not exist.
    NotFound,
}

/// Conversation service.
#[derive(Clone)]
pub struct ConversationService {
    conversation_repo: ConversationRepository,
    creator_repo: CreatorRepository,
}

fn now_label() -> String {
    Local::now().format("%I:%M %p").to_string()
}

impl ConversationService {
    /// Create a new conversation service.
    #[must_use]
    pub const fn new(
        conversation_repo: ConversationRepository,
        creator_repo: CreatorRepository,
    ) -> Self {
        Self {
            conversation_repo,
            creator_repo,
        }
    }

    /// Get a conversation by ID.
    pub fn get_conversation(&self, conversation_id: u64) -> AppResult<Conversation> {
        self.conversation_repo.get_by_id(conversation_id)
    }

    /// Open a conversation: fetch it and clear its unread count.
    pub fn open_conversation(&self, conversation_id: u64) -> AppResult<Conversation> {
        self.mark_read(conversation_id)?
            .ok_or(AppError::ConversationNotFound(conversation_id))
    }

    /// Clear a conversation's unread count.
    pub fn mark_read(&self, conversation_id: u64) -> AppResult<Option<Conversation>> {
        let updated = self.conversation_repo.update(conversation_id, |c| {
            c.unread_count = 0;
            c.clone()
        })?;
        if updated.is_none() {
            debug!(conversation_id, "Mark read skipped: conversation not found");
        }
        Ok(updated)
    }

    /// Unlock a pay-per-view message. No payment is taken.
    ///
    /// Unlocking is one-way; repeating it leaves the message unlocked.
    pub fn unlock_message(
        &self,
        conversation_id: u64,
        message_id: u64,
    ) -> AppResult<UnlockOutcome> {
        let result = self.conversation_repo.update(conversation_id, |c| {
            c.find_message_mut(message_id).map(|message| {
                let changed = message.unlock();
                (message.clone(), changed)
            })
        })?;

        match result {
            Some(Some((message, true))) => {
                info!(conversation_id, message_id, "Unlocked message");
                Ok(UnlockOutcome::Unlocked(message))
            }
            Some(Some((message, false))) => {
                debug!(conversation_id, message_id, "Unlock skipped: not locked");
                Ok(UnlockOutcome::Unchanged(message))
            }
            Some(None) => {
                debug!(conversation_id, message_id, "Unlock skipped: message not found");
                Ok(UnlockOutcome::NotFound)
            }
            None => {
                debug!(conversation_id, message_id, "Unlock skipped: conversation not found");
                Ok(UnlockOutcome::NotFound)
            }
        }
    }

    /// Append a text message from the viewer. Blank input is ignored.
    pub fn send_text_message(&self, conversation_id: u64, content: String) -> AppResult<SendOutcome> {
        if content.trim().is_empty() {
            debug!(conversation_id, "Send skipped: empty text");
            return Ok(SendOutcome::Skipped);
        }
        self.append(conversation_id, |id| {
            Message::text(id, Sender::User, content, now_label())
        })
    }

    /// Append a media message from the viewer.
    ///
    /// Pay-per-view media needs a positive price. It is unlocked for the viewer.
    pub fn send_media_message(
        &self,
        conversation_id: u64,
        url: String,
        is_ppv: bool,
        price: Option<Price>,
    ) -> AppResult<SendOutcome> {
        if url.trim().is_empty() {
            debug!(conversation_id, "Send skipped: empty media");
            return Ok(SendOutcome::Skipped);
        }
        let price = if is_ppv {
            match price {
                Some(price) if !price.is_free() => Some(price),
                _ => {
                    warn!(conversation_id, "Rejected pay-per-view media without a price");
                    return Err(AppError::Validation(
                        "Pay-per-view media needs a positive price".to_string(),
                    ));
                }
            }
        } else {
            None
        };
        self.append(conversation_id, |id| {
            Message::media(id, Sender::User, url, price, now_label())
        })
    }

    fn append(
        &self,
        conversation_id: u64,
        build: impl FnOnce(u64) -> Message,
    ) -> AppResult<SendOutcome> {
        let sent = self.conversation_repo.update(conversation_id, |c| {
            let message = build(c.next_message_id());
            c.messages.push(message.clone());
            message
        })?;
        match sent {
            Some(message) => {
                info!(
                    conversation_id,
                    message_id = message.id,
                    media = message.is_media(),
                    "Sent message"
                );
                Ok(SendOutcome::Sent(message))
            }
            None => {
                debug!(conversation_id, "Send skipped: conversation not found");
                Ok(SendOutcome::NotFound)
            }
        }
    }

    /// Media the viewer can see in a conversation, oldest first.
    pub fn gallery(&self, conversation_id: u64) -> AppResult<Vec<Message>> {
        let conversation = self.conversation_repo.get_by_id(conversation_id)?;
        Ok(conversation.gallery().cloned().collect())
    }

    /// Inbox listing in conversation order. Conversations with unknown creators are skipped.
    pub fn inbox(&self) -> AppResult<Vec<ConversationSummary>> {
        let mut summaries = Vec::new();
        for conversation in self.conversation_repo.find_all()? {
            let Some(creator) = self.creator_repo.find_by_id(conversation.creator_id)? else {
                continue;
            };
            let last = conversation.last_message();
            summaries.push(ConversationSummary {
                conversation_id: conversation.id,
                creator_id: creator.id,
                creator_name: creator.name,
                creator_picture: creator.profile_picture,
                creator_online: creator.is_online,
                last_message: last.map(|m| m.preview().to_string()),
                last_timestamp: last.map(|m| m.timestamp.clone()),
                unread_count: conversation.unread_count,
            });
        }
        Ok(summaries)
    }

    /// Unread messages across all conversations.
    pub fn total_unread(&self) -> AppResult<u64> {
        self.conversation_repo.total_unread()
    }
}
