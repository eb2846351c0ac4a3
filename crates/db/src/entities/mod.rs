//! In-memory entities.

#![allow(missing_docs)]

pub mod conversation;
pub mod creator;
pub mod message;
pub mod post;
pub mod subscription;

pub use conversation::Model as Conversation;
pub use creator::{CreatorStats, Model as Creator};
pub use message::{MessageBody, MessagePaywall, Model as Message, Sender, UnlockState};
pub use post::{MediaKind, Model as Post, PostAccess, PostContent};
pub use subscription::Model as Subscription;
