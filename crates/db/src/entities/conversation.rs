//! Conversation entity: one direct-message thread with a creator.

use super::message;
use fanvault_common::IdSequence;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: u64,

    /// Creator on the other side of the thread
    pub creator_id: u64,

    /// Messages in chronological (insertion) order
    #[serde(default)]
    pub messages: Vec<message::Model>,

    #[serde(default)]
    pub unread_count: u32,

    /// Issues message ids; rebuilt from `messages` on load
    #[serde(skip)]
    pub message_ids: IdSequence,
}

impl Model {
    /// Create an empty conversation.
    #[must_use]
    pub const fn new(id: u64, creator_id: u64) -> Self {
        Self {
            id,
            creator_id,
            messages: Vec::new(),
            unread_count: 0,
            message_ids: IdSequence::new(),
        }
    }

    /// Re-derive the message id sequence and sender invariants after deserializing.
    pub fn normalize(&mut self) {
        self.message_ids = IdSequence::after(self.messages.iter().map(|m| m.id));
        for message in &mut self.messages {
            message.normalize();
        }
    }

    /// Reserve the next message id.
    pub const fn next_message_id(&mut self) -> u64 {
        self.message_ids.next_id()
    }

    /// Find a message by ID.
    #[must_use]
    pub fn find_message(&self, message_id: u64) -> Option<&message::Model> {
        self.messages.iter().find(|m| m.id == message_id)
    }

    /// Find a message by ID for mutation.
    pub fn find_message_mut(&mut self, message_id: u64) -> Option<&mut message::Model> {
        self.messages.iter_mut().find(|m| m.id == message_id)
    }

    /// The most recent message.
    #[must_use]
    pub fn last_message(&self) -> Option<&message::Model> {
        self.messages.last()
    }

    /// Media messages the viewer can see, oldest first.
    pub fn gallery(&self) -> impl Iterator<Item = &message::Model> {
        self.messages.iter().filter(|m| m.is_gallery_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::message::Sender;
    use fanvault_common::Price;

    fn conversation() -> Model {
        let mut conversation = Model::new(1, 1);
        conversation.messages = vec![
            message::Model::text(1, Sender::Creator, "Hey".to_string(), "10:30 AM".to_string()),
            message::Model::text(2, Sender::User, "Hi".to_string(), "10:32 AM".to_string()),
            message::Model::media(
                5,
                Sender::Creator,
                "https://picsum.photos/seed/chat1/400/600".to_string(),
                Some(Price::from_cents(500)),
                "10:35 AM".to_string(),
            ),
        ];
        conversation.normalize();
        conversation
    }

    #[test]
    fn test_next_message_id_follows_max() {
        let mut conversation = conversation();
        assert_eq!(conversation.next_message_id(), 6);
        assert_eq!(conversation.next_message_id(), 7);
    }

    #[test]
    fn test_gallery_excludes_locked_media() {
        let mut conversation = conversation();
        assert_eq!(conversation.gallery().count(), 0);

        if let Some(message) = conversation.find_message_mut(5) {
            assert!(message.unlock());
        }
        let ids: Vec<u64> = conversation.gallery().map(|m| m.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_last_message() {
        let conversation = conversation();
        assert_eq!(conversation.last_message().map(|m| m.id), Some(5));
        assert!(Model::new(2, 2).last_message().is_none());
    }
}
