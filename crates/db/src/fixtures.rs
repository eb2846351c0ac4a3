//! Seed data for a session.
//!
//! The built-in fixtures mirror the demo catalog: six creators, a short feed for the
//! signed-in creator, three conversations and three subscriptions. A JSON document of
//! the same shape can replace them.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use fanvault_common::{AppError, AppResult, Price};
use serde::{Deserialize, Serialize};

use crate::entities::{
    Conversation, Creator, CreatorStats, MediaKind, Message, Post, PostAccess, PostContent,
    Sender, Subscription,
};

/// Every collection a session starts from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub creators: Vec<Creator>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl Fixtures {
    /// Parse fixtures from a JSON document.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read fixtures from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::Fixture(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Check referential integrity and restore derived state.
    ///
    /// Ids must be unique per collection, posts, conversations and subscriptions must
    /// point at a known creator, and at most one post per creator may be pinned.
    pub fn validated(mut self) -> AppResult<Self> {
        let mut creator_ids = HashSet::new();
        for creator in &self.creators {
            if !creator_ids.insert(creator.id) {
                return Err(AppError::Fixture(format!("duplicate creator id {}", creator.id)));
            }
        }

        let mut post_ids = HashSet::new();
        let mut pinned_by = HashSet::new();
        for post in &self.posts {
            if !post_ids.insert(post.id) {
                return Err(AppError::Fixture(format!("duplicate post id {}", post.id)));
            }
            if !creator_ids.contains(&post.creator_id) {
                return Err(AppError::Fixture(format!(
                    "post {} references unknown creator {}",
                    post.id, post.creator_id
                )));
            }
            if post.is_pinned && !pinned_by.insert(post.creator_id) {
                return Err(AppError::Fixture(format!(
                    "creator {} has more than one pinned post",
                    post.creator_id
                )));
            }
        }

        let mut conversation_ids = HashSet::new();
        for conversation in &mut self.conversations {
            if !conversation_ids.insert(conversation.id) {
                return Err(AppError::Fixture(format!(
                    "duplicate conversation id {}",
                    conversation.id
                )));
            }
            if !creator_ids.contains(&conversation.creator_id) {
                return Err(AppError::Fixture(format!(
                    "conversation {} references unknown creator {}",
                    conversation.id, conversation.creator_id
                )));
            }
            let mut message_ids = HashSet::new();
            for message in &conversation.messages {
                if !message_ids.insert(message.id) {
                    return Err(AppError::Fixture(format!(
                        "duplicate message id {} in conversation {}",
                        message.id, conversation.id
                    )));
                }
            }
            conversation.normalize();
        }

        let mut subscribed = HashSet::new();
        for subscription in &self.subscriptions {
            if !creator_ids.contains(&subscription.creator_id) {
                return Err(AppError::Fixture(format!(
                    "subscription references unknown creator {}",
                    subscription.creator_id
                )));
            }
            if !subscribed.insert(subscription.creator_id) {
                return Err(AppError::Fixture(format!(
                    "duplicate subscription to creator {}",
                    subscription.creator_id
                )));
            }
        }

        Ok(self)
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            creators: builtin_creators(),
            posts: builtin_posts(),
            conversations: builtin_conversations(),
            subscriptions: builtin_subscriptions(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn creator(
    id: u64,
    name: &str,
    age: u8,
    location: &str,
    is_online: bool,
    bio: &str,
    stats: [u64; 4],
    subscriber_count: u64,
    price_cents: u32,
) -> Creator {
    let seed = name.to_lowercase();
    let [likes, comments, views, posts] = stats;
    Creator {
        id,
        name: name.to_string(),
        age,
        location: location.to_string(),
        is_online,
        profile_picture: format!("https://picsum.photos/seed/{seed}/500/500"),
        banner_picture: format!("https://picsum.photos/seed/{seed}-banner/1200/400"),
        bio: bio.to_string(),
        stats: CreatorStats {
            likes,
            comments,
            views,
            posts,
        },
        subscriber_count,
        subscription_price: Price::from_cents(price_cents),
    }
}

fn builtin_creators() -> Vec<Creator> {
    vec![
        creator(
            1,
            "Seraphina",
            23,
            "5 miles away",
            true,
            "Just a girl exploring the world one city at a time. ✈️ Lover of art, coffee, and deep conversations. DM for exclusives! ✨",
            [1_200_000, 78_000, 23_000_000, 452],
            25_600,
            75,
        ),
        creator(
            2,
            "Luna",
            21,
            "2 miles away",
            true,
            "Fitness enthusiast and gamer girl. 🎮 Let's level up together. Sub for workout tips and late-night gaming streams.",
            [850_000, 45_000, 15_000_000, 310],
            19_800,
            60,
        ),
        creator(
            3,
            "Aurora",
            25,
            "10 miles away",
            false,
            "Artist, dreamer, and night owl. 🌙 My gallery is my sanctuary. Subscribe to see my latest creations and inspirations.",
            [2_100_000, 150_000, 45_000_000, 820],
            42_300,
            90,
        ),
        creator(
            4,
            "Chloe",
            22,
            "8 miles away",
            true,
            "Fashionista and foodie. Finding beauty in everyday life. 🍜👠 My DMs are open for style advice and recipe swaps!",
            [950_000, 62_000, 18_000_000, 630],
            31_000,
            55,
        ),
        creator(
            5,
            "Isabella",
            26,
            "15 miles away",
            false,
            "Bookworm and aspiring writer. Lost in fictional worlds. 📚 Let's talk about our favorite characters.",
            [450_000, 31_000, 9_000_000, 250],
            12_500,
            50,
        ),
        creator(
            6,
            "Mia",
            20,
            "3 miles away",
            true,
            "Dancer and music lover. Life is a rhythm. 🎶 Sub for exclusive dance clips and my curated playlists.",
            [1_500_000, 95_000, 32_000_000, 550],
            38_000,
            85,
        ),
    ]
}

fn image(seed: &str, access: PostAccess) -> PostContent {
    PostContent::Media {
        kind: MediaKind::Image,
        url: format!("https://picsum.photos/seed/{seed}/800/1000"),
        access,
    }
}

fn builtin_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            creator_id: 1,
            content: image("post1", PostAccess::Free),
            caption: Some(
                "Had an amazing photoshoot today! 📸 What do you think of this look?".to_string(),
            ),
            timestamp: "2 hours ago".to_string(),
            likes: 1200,
            comments: 85,
            is_liked: true,
            is_pinned: false,
        },
        Post {
            id: 2,
            creator_id: 1,
            content: PostContent::Text {
                body: "Just thinking about what content to make next. Any suggestions? Drop them in the comments below! 👇".to_string(),
            },
            caption: None,
            timestamp: "5 hours ago".to_string(),
            likes: 540,
            comments: 150,
            is_liked: false,
            is_pinned: false,
        },
        Post {
            id: 3,
            creator_id: 1,
            content: image(
                "post2",
                PostAccess::PayPerView {
                    price: Price::from_cents(1000),
                },
            ),
            caption: Some(
                "A little something extra from my latest set. Want to see the rest? 😉".to_string(),
            ),
            timestamp: "1 day ago".to_string(),
            likes: 2500,
            comments: 210,
            is_liked: false,
            is_pinned: false,
        },
        Post {
            id: 4,
            creator_id: 1,
            content: image("post3", PostAccess::Free),
            caption: Some("Lazy Sunday mornings are the best.".to_string()),
            timestamp: "2 days ago".to_string(),
            likes: 1800,
            comments: 130,
            is_liked: true,
            is_pinned: false,
        },
    ]
}

fn text(id: u64, sender: Sender, content: &str, timestamp: &str) -> Message {
    Message::text(id, sender, content.to_string(), timestamp.to_string())
}

fn thread(id: u64, creator_id: u64, unread_count: u32, messages: Vec<Message>) -> Conversation {
    let mut conversation = Conversation::new(id, creator_id);
    conversation.messages = messages;
    conversation.unread_count = unread_count;
    conversation.normalize();
    conversation
}

fn builtin_conversations() -> Vec<Conversation> {
    vec![
        thread(
            1,
            1,
            2,
            vec![
                text(
                    1,
                    Sender::Creator,
                    "Hey there! So glad you subscribed. How's your day going?",
                    "10:30 AM",
                ),
                text(
                    2,
                    Sender::User,
                    "It's going great! Just relaxing. How about you?",
                    "10:32 AM",
                ),
                Message::media(
                    3,
                    Sender::Creator,
                    "https://picsum.photos/seed/chat1/400/600".to_string(),
                    Some(Price::from_cents(500)),
                    "10:35 AM".to_string(),
                ),
                text(4, Sender::Creator, "Sent you something special 😉", "10:35 AM"),
            ],
        ),
        thread(
            2,
            2,
            0,
            vec![
                text(1, Sender::Creator, "Thanks for the sub! Ready to game?", "Yesterday"),
                text(2, Sender::User, "Always! What are we playing?", "Yesterday"),
            ],
        ),
        thread(
            3,
            4,
            1,
            vec![
                text(1, Sender::Creator, "Welcome! You have great taste 😉", "3 days ago"),
                text(2, Sender::User, "Haha, thanks! Love your style.", "3 days ago"),
                // Flagged pay-per-view upstream, but text is always shown in full.
                text(
                    3,
                    Sender::Creator,
                    "Unlock this message to see my favorite outfit of the week.",
                    "11:00 AM",
                ),
            ],
        ),
    ]
}

fn builtin_subscriptions() -> Vec<Subscription> {
    [(1, (2024, 8, 15)), (3, (2024, 8, 22)), (6, (2024, 9, 1))]
        .into_iter()
        .filter_map(|(creator_id, (y, m, d))| {
            NaiveDate::from_ymd_opt(y, m, d).map(|renewal_date| Subscription {
                creator_id,
                renewal_date,
            })
        })
        .collect()
}
