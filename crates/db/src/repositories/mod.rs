//! Repositories over the in-memory tables.

mod conversation;
mod creator;
mod post;
mod subscription;

pub use conversation::ConversationRepository;
pub use creator::CreatorRepository;
pub use post::PostRepository;
pub use subscription::SubscriptionRepository;
