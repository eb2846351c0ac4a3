//! Direct message entity.

use fanvault_common::Price;
use serde::{Deserialize, Serialize};

/// Author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sender {
    /// The signed-in viewer.
    User,
    /// The creator on the other side of the conversation.
    #[serde(rename = "MODEL", alias = "CREATOR")]
    Creator,
}

/// Paywall attached to a media message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum MessagePaywall {
    #[default]
    Free,
    PayPerView { price: Price, unlocked: bool },
}

/// Payload of a message. Text messages cannot be pay-per-view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum MessageBody {
    Text {
        content: String,
    },
    Media {
        url: String,
        #[serde(default)]
        paywall: MessagePaywall,
    },
}

/// Unlock state of a message as seen by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnlockState {
    Locked,
    Unlocked,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique within its conversation
    pub id: u64,

    pub sender: Sender,

    pub body: MessageBody,

    /// Wall-clock label ("10:35 AM")
    pub timestamp: String,
}

impl Model {
    /// Build a text message.
    #[must_use]
    pub const fn text(id: u64, sender: Sender, content: String, timestamp: String) -> Self {
        Self {
            id,
            sender,
            body: MessageBody::Text { content },
            timestamp,
        }
    }

    /// Build a media message.
    ///
    /// Pay-per-view media starts locked only when a creator sent it; the viewer never
    /// has to unlock what they sent themselves.
    #[must_use]
    pub fn media(
        id: u64,
        sender: Sender,
        url: String,
        price: Option<Price>,
        timestamp: String,
    ) -> Self {
        let paywall = match price {
            Some(price) => MessagePaywall::PayPerView {
                price,
                unlocked: sender == Sender::User,
            },
            None => MessagePaywall::Free,
        };
        Self {
            id,
            sender,
            body: MessageBody::Media { url, paywall },
            timestamp,
        }
    }

    /// Whether the message carries media.
    #[must_use]
    pub const fn is_media(&self) -> bool {
        matches!(self.body, MessageBody::Media { .. })
    }

    /// The unlock price if this message is pay-per-view.
    #[must_use]
    pub const fn ppv_price(&self) -> Option<Price> {
        match self.body {
            MessageBody::Media {
                paywall: MessagePaywall::PayPerView { price, .. },
                ..
            } => Some(price),
            _ => None,
        }
    }

    /// Current unlock state.
    #[must_use]
    pub const fn unlock_state(&self) -> UnlockState {
        match self.body {
            MessageBody::Media {
                paywall: MessagePaywall::PayPerView { unlocked: false, .. },
                ..
            } => UnlockState::Locked,
            _ => UnlockState::Unlocked,
        }
    }

    /// Whether the message is pay-per-view media that has not been unlocked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self.unlock_state(), UnlockState::Locked)
    }

    /// Move a locked message to unlocked. Returns whether the state changed.
    pub const fn unlock(&mut self) -> bool {
        match &mut self.body {
            MessageBody::Media {
                paywall: MessagePaywall::PayPerView { unlocked, .. },
                ..
            } if !*unlocked => {
                *unlocked = true;
                true
            }
            _ => false,
        }
    }

    /// Whether the message belongs in the conversation's media gallery.
    #[must_use]
    pub const fn is_gallery_item(&self) -> bool {
        self.is_media() && !self.is_locked()
    }

    /// One-line preview for inbox listings.
    #[must_use]
    pub fn preview(&self) -> &str {
        match &self.body {
            MessageBody::Text { content } => content.as_str(),
            MessageBody::Media { .. } => "Sent a photo",
        }
    }

    /// Restore the sender invariant on deserialized data: viewer media is never locked.
    pub const fn normalize(&mut self) {
        if matches!(self.sender, Sender::User) {
            self.unlock();
        }
    }
}
