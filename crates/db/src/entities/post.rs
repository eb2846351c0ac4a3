//! Post entity.

use fanvault_common::Price;
use serde::{Deserialize, Serialize};

/// Kind of media a post carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Access rule for a media post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PostAccess {
    /// Visible to owners and subscribers.
    #[default]
    Free,
    /// Gated behind a per-post price regardless of subscription.
    PayPerView { price: Price },
}

/// Payload of a post. Text posts cannot be pay-per-view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostContent {
    Text {
        body: String,
    },
    Media {
        kind: MediaKind,
        url: String,
        #[serde(default)]
        access: PostAccess,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: u64,

    /// Owning creator ID
    pub creator_id: u64,

    pub content: PostContent,

    #[serde(default)]
    pub caption: Option<String>,

    /// Relative time label ("2 hours ago")
    pub timestamp: String,

    #[serde(default)]
    pub likes: u32,

    #[serde(default)]
    pub comments: u32,

    #[serde(default)]
    pub is_liked: bool,

    #[serde(default)]
    pub is_pinned: bool,
}

impl Model {
    /// Whether this is a plain text post.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.content, PostContent::Text { .. })
    }

    /// The unlock price if this post is pay-per-view.
    #[must_use]
    pub const fn ppv_price(&self) -> Option<Price> {
        match self.content {
            PostContent::Media {
                access: PostAccess::PayPerView { price },
                ..
            } => Some(price),
            _ => None,
        }
    }

    /// Whether this post is pay-per-view.
    #[must_use]
    pub const fn is_ppv(&self) -> bool {
        self.ppv_price().is_some()
    }

    /// Toggle the like flag, keeping the counter in step and never below zero.
    pub const fn toggle_like(&mut self) {
        self.is_liked = !self.is_liked;
        self.likes = if self.is_liked {
            self.likes.saturating_add(1)
        } else {
            self.likes.saturating_sub(1)
        };
    }
}
