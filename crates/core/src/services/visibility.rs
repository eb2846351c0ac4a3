//! Visibility resolution for posts and messages.
//!
//! Pure functions: they read an entity plus the viewer's relationship to its creator
//! and decide how much of it may be rendered.

use fanvault_common::Price;
use fanvault_db::entities::{Message, Post};
use serde::Serialize;

/// How a post or message may be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderState {
    /// Content is shown as-is.
    Full,
    /// Content is blurred behind a "subscribe to see content" prompt.
    LockedSubscribe,
    /// Content is blurred behind a per-item price.
    LockedPpv { price: Price },
}

/// The viewer's relationship to the creator of the item being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerContext {
    /// The viewer owns the creator profile.
    pub is_owner: bool,
    /// The viewer holds a subscription to the creator.
    pub is_subscribed: bool,
}

/// Decide how a post renders for a viewer.
///
/// Text posts are never locked. Owners see everything. Pay-per-view media stays locked
/// for subscribers; everything else opens with a subscription.
#[must_use]
pub fn resolve_post(post: &Post, viewer: ViewerContext) -> RenderState {
    if post.is_text() || viewer.is_owner {
        return RenderState::Full;
    }
    if let Some(price) = post.ppv_price() {
        return RenderState::LockedPpv { price };
    }
    if viewer.is_subscribed {
        RenderState::Full
    } else {
        RenderState::LockedSubscribe
    }
}

/// Decide how a message renders. Only locked pay-per-view media is hidden.
#[must_use]
pub fn resolve_message(message: &Message) -> RenderState {
    match message.ppv_price() {
        Some(price) if message.is_locked() => RenderState::LockedPpv { price },
        _ => RenderState::Full,
    }
}
