//! Business logic services.

#![allow(missing_docs)]

pub mod conversation;
pub mod creator;
pub mod feed;
pub mod subscription;
pub mod visibility;

pub use conversation::{ConversationService, ConversationSummary, SendOutcome, UnlockOutcome};
pub use creator::{CreatorService, ProfileStats, UpdateProfileInput};
pub use feed::{CreatePostInput, FeedService, NewPostContent};
pub use subscription::{ActiveSubscription, SubscriptionService};
pub use visibility::{RenderState, ViewerContext, resolve_message, resolve_post};
