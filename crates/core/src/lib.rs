//! Core business logic for fanvault.
//!
//! Services implement the individual features over the in-memory store; [`Session`]
//! wires them together for one viewer.

pub mod services;
pub mod session;

pub use services::*;
pub use session::{
    Action, ActionOutcome, ChatView, FeedItem, MessageItem, ProfileView, Session,
    SessionSnapshot,
};
