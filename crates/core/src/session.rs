//! Session controller.
//!
//! A [`Session`] owns every store for one signed-in viewer and is the only writer.
//! Presentation code reads through its query methods and changes state by
//! dispatching [`Action`]s.

use std::sync::Arc;

use fanvault_common::{AppError, AppResult, Config, MetricsSnapshot, Price, SessionMetrics};
use fanvault_db::{
    MemoryDatabase,
    entities::{Conversation, Creator, Message, Post, Subscription},
    repositories::{
        ConversationRepository, CreatorRepository, PostRepository, SubscriptionRepository,
    },
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::{
    ConversationService, CreatePostInput, CreatorService, FeedService, ProfileStats, RenderState,
    SendOutcome, SubscriptionService, UnlockOutcome, UpdateProfileInput, ViewerContext,
    resolve_message,
    resolve_post,
};

/// A state change requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    CreatePost {
        creator_id: u64,
        post: CreatePostInput,
    },
    DeletePost {
        post_id: u64,
    },
    PinPost {
        post_id: u64,
    },
    EditPost {
        post_id: u64,
        caption: String,
    },
    LikePost {
        post_id: u64,
    },
    OpenConversation {
        conversation_id: u64,
    },
    MarkRead {
        conversation_id: u64,
    },
    UnlockMessage {
        conversation_id: u64,
        message_id: u64,
    },
    SendText {
        conversation_id: u64,
        content: String,
    },
    SendMedia {
        conversation_id: u64,
        url: String,
        #[serde(default)]
        is_ppv: bool,
        #[serde(default)]
        price: Option<Price>,
    },
    UpdateProfile {
        profile: UpdateProfileInput,
    },
    Subscribe {
        creator_id: u64,
    },
    CancelSubscription {
        creator_id: u64,
    },
}

/// What a dispatched action produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ActionOutcome {
    Post(Post),
    PostDeleted { post_id: u64 },
    Conversation(Conversation),
    Message(Message),
    Creator(Creator),
    Subscription(Subscription),
    SubscriptionCancelled { creator_id: u64 },
    /// The input was dropped without changing state.
    Skipped,
    /// The action referenced an id that does not exist; nothing changed.
    NotFound,
}

/// A post paired with how it renders for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub post: Post,
    pub render: RenderState,
}

/// A message paired with how it renders for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageItem {
    pub message: Message,
    pub render: RenderState,
}

/// Everything a profile page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub creator: Creator,
    pub stats: ProfileStats,
    pub is_own_profile: bool,
    pub is_subscribed: bool,
    pub posts: Vec<FeedItem>,
}

/// Everything a chat page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatView {
    pub conversation_id: u64,
    pub creator: Creator,
    pub messages: Vec<MessageItem>,
}

/// Serializable copy of every collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub viewer_id: u64,
    pub creators: Vec<Creator>,
    pub posts: Vec<Post>,
    pub conversations: Vec<Conversation>,
    pub subscriptions: Vec<Subscription>,
    pub total_unread: u64,
    pub metrics: MetricsSnapshot,
}

/// Application state for one viewer.
pub struct Session {
    viewer_id: u64,
    db: Arc<MemoryDatabase>,
    creators: CreatorService,
    feed: FeedService,
    conversations: ConversationService,
    subscriptions: SubscriptionService,
    metrics: SessionMetrics,
}

impl Session {
    /// Seed a session from configuration.
    pub fn seed(config: &Config) -> AppResult<Self> {
        let db = fanvault_db::init(config)?;
        Ok(Self::with_database(db, config))
    }

    /// Build a session over an existing database.
    #[must_use]
    pub fn with_database(db: Arc<MemoryDatabase>, config: &Config) -> Self {
        let creator_repo = CreatorRepository::new(db.clone());
        let post_repo = PostRepository::new(db.clone());
        let conversation_repo = ConversationRepository::new(db.clone());
        let subscription_repo = SubscriptionRepository::new(db.clone());

        Self {
            viewer_id: config.session.current_user_id,
            creators: CreatorService::new(creator_repo.clone()),
            feed: FeedService::new(post_repo, creator_repo.clone(), config.feed.pin_scope),
            conversations: ConversationService::new(conversation_repo, creator_repo.clone()),
            subscriptions: SubscriptionService::new(
                subscription_repo,
                creator_repo,
                config.subscription.renewal_days,
            ),
            metrics: SessionMetrics::new(),
            db,
        }
    }

    /// Creator id of the signed-in viewer.
    #[must_use]
    pub const fn viewer_id(&self) -> u64 {
        self.viewer_id
    }

    /// Creator catalog.
    #[must_use]
    pub const fn creators(&self) -> &CreatorService {
        &self.creators
    }

    /// Post feed.
    #[must_use]
    pub const fn feed(&self) -> &FeedService {
        &self.feed
    }

    /// Direct messages.
    #[must_use]
    pub const fn conversations(&self) -> &ConversationService {
        &self.conversations
    }

    /// Subscriptions.
    #[must_use]
    pub const fn subscriptions(&self) -> &SubscriptionService {
        &self.subscriptions
    }

    /// Current counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// The viewer's relationship to a creator.
    pub fn viewer_context(&self, creator_id: u64) -> AppResult<ViewerContext> {
        Ok(ViewerContext {
            is_owner: creator_id == self.viewer_id,
            is_subscribed: self.subscriptions.is_subscribed(creator_id)?,
        })
    }

    /// A creator's posts, pinned first, each with its render state.
    pub fn list_feed(&self, creator_id: u64) -> AppResult<Vec<FeedItem>> {
        let viewer = self.viewer_context(creator_id)?;
        Ok(self
            .feed
            .list_posts_by_creator(creator_id)?
            .into_iter()
            .map(|post| {
                let render = resolve_post(&post, viewer);
                FeedItem { post, render }
            })
            .collect())
    }

    /// Profile page for a creator.
    pub fn profile(&self, creator_id: u64) -> AppResult<ProfileView> {
        let creator = self.creators.get_creator(creator_id)?;
        let viewer = self.viewer_context(creator_id)?;
        Ok(ProfileView {
            stats: CreatorService::profile_stats(&creator),
            is_own_profile: viewer.is_owner,
            is_subscribed: viewer.is_subscribed,
            posts: self.list_feed(creator_id)?,
            creator,
        })
    }

    /// Chat page for a conversation. Read-only; opening is an [`Action`].
    pub fn chat(&self, conversation_id: u64) -> AppResult<ChatView> {
        let conversation = self.conversations.get_conversation(conversation_id)?;
        let creator = self.creators.get_creator(conversation.creator_id)?;
        Ok(ChatView {
            conversation_id,
            creator,
            messages: conversation
                .messages
                .into_iter()
                .map(|message| {
                    let render = resolve_message(&message);
                    MessageItem { message, render }
                })
                .collect(),
        })
    }

    /// Apply one action.
    pub fn dispatch(&self, action: Action) -> AppResult<ActionOutcome> {
        let m = &self.metrics;
        let outcome = match action {
            Action::CreatePost { creator_id, post } => {
                let post = self.feed.create_post(creator_id, post)?;
                SessionMetrics::incr(&m.posts_created);
                ActionOutcome::Post(post)
            }
            Action::DeletePost { post_id } => {
                if self.feed.delete_post(post_id)? {
                    SessionMetrics::incr(&m.posts_deleted);
                    ActionOutcome::PostDeleted { post_id }
                } else {
                    ActionOutcome::NotFound
                }
            }
            Action::PinPost { post_id } => self
                .feed
                .pin_post(post_id)?
                .map(|post| {
                    SessionMetrics::incr(&m.pins_toggled);
                    ActionOutcome::Post(post)
                })
                .unwrap_or(ActionOutcome::NotFound),
            Action::EditPost { post_id, caption } => self
                .feed
                .edit_post(post_id, caption)?
                .map(|post| {
                    SessionMetrics::incr(&m.posts_edited);
                    ActionOutcome::Post(post)
                })
                .unwrap_or(ActionOutcome::NotFound),
            Action::LikePost { post_id } => self
                .feed
                .like_post(post_id)?
                .map(|post| {
                    SessionMetrics::incr(&m.likes_toggled);
                    ActionOutcome::Post(post)
                })
                .unwrap_or(ActionOutcome::NotFound),
            Action::OpenConversation { conversation_id } | Action::MarkRead { conversation_id } => {
                self.conversations
                    .mark_read(conversation_id)?
                    .map(|conversation| {
                        SessionMetrics::incr(&m.conversations_read);
                        ActionOutcome::Conversation(conversation)
                    })
                    .unwrap_or(ActionOutcome::NotFound)
            }
            Action::UnlockMessage {
                conversation_id,
                message_id,
            } => match self
                .conversations
                .unlock_message(conversation_id, message_id)?
            {
                UnlockOutcome::Unlocked(message) => {
                    SessionMetrics::incr(&m.messages_unlocked);
                    ActionOutcome::Message(message)
                }
                UnlockOutcome::Unchanged(message) => ActionOutcome::Message(message),
                UnlockOutcome::NotFound => ActionOutcome::NotFound,
            },
            Action::SendText {
                conversation_id,
                content,
            } => self.record_send(
                self.conversations
                    .send_text_message(conversation_id, content)?,
            ),
            Action::SendMedia {
                conversation_id,
                url,
                is_ppv,
                price,
            } => self.record_send(self.conversations.send_media_message(
                conversation_id,
                url,
                is_ppv,
                price,
            )?),
            Action::UpdateProfile { profile } => {
                ActionOutcome::Creator(self.creators.update_profile(self.viewer_id, profile)?)
            }
            Action::Subscribe { creator_id } => {
                let already = self.subscriptions.is_subscribed(creator_id)?;
                let subscription = self.subscriptions.subscribe(creator_id)?;
                if !already {
                    SessionMetrics::incr(&m.subscriptions_started);
                }
                ActionOutcome::Subscription(subscription)
            }
            Action::CancelSubscription { creator_id } => {
                if self.subscriptions.cancel(creator_id)? {
                    SessionMetrics::incr(&m.subscriptions_cancelled);
                    ActionOutcome::SubscriptionCancelled { creator_id }
                } else {
                    ActionOutcome::NotFound
                }
            }
        };

        if outcome == ActionOutcome::NotFound {
            self.metrics.record_not_found();
        }
        Ok(outcome)
    }

    fn record_send(&self, outcome: SendOutcome) -> ActionOutcome {
        match outcome {
            SendOutcome::Sent(message) => {
                SessionMetrics::incr(&self.metrics.messages_sent);
                ActionOutcome::Message(message)
            }
            SendOutcome::Skipped => {
                SessionMetrics::incr(&self.metrics.sends_skipped);
                ActionOutcome::Skipped
            }
            SendOutcome::NotFound => ActionOutcome::NotFound,
        }
    }

    /// Apply a script of actions in order, stopping at the first error.
    pub fn replay<I: IntoIterator<Item = Action>>(&self, actions: I) -> AppResult<Vec<ActionOutcome>> {
        let mut outcomes = Vec::new();
        for (index, action) in actions.into_iter().enumerate() {
            let outcome = self.dispatch(action).inspect_err(|e| {
                tracing::warn!(index, error = %e, code = e.error_code(), "Replay stopped");
            })?;
            outcomes.push(outcome);
        }
        info!(applied = outcomes.len(), "Replayed actions");
        Ok(outcomes)
    }

    /// Parse a JSON array of actions.
    pub fn parse_script(json: &str) -> AppResult<Vec<Action>> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Validation(format!("invalid action script: {e}")))
    }

    /// Copy every collection.
    pub fn snapshot(&self) -> AppResult<SessionSnapshot> {
        Ok(SessionSnapshot {
            viewer_id: self.viewer_id,
            creators: self.db.creators.read()?.clone(),
            posts: self.db.posts.read()?.clone(),
            conversations: self.db.conversations.read()?.clone(),
            subscriptions: self.db.subscriptions.read()?.clone(),
            total_unread: self.conversations.total_unread()?,
            metrics: self.metrics.snapshot(),
        })
    }
}
