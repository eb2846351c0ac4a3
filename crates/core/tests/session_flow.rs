//! Session integration tests.
//!
//! These tests drive the session the way the presentation layer does: dispatch actions,
//! then re-query.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use std::sync::Arc;

use fanvault_common::{AppError, Config, PinScope, Price};
use fanvault_core::{
    Action, ActionOutcome, CreatePostInput, NewPostContent, RenderState, Session,
    resolve_post,
};
use fanvault_db::{
    MemoryDatabase,
    entities::{MediaKind, PostAccess, PostContent, UnlockState},
    fixtures::Fixtures,
};

fn seeded() -> Session {
    Session::seed(&Config::default()).unwrap()
}

fn session_with(fixtures: Fixtures, config: &Config) -> Session {
    let db = Arc::new(MemoryDatabase::from_fixtures(fixtures.validated().unwrap()));
    Session::with_database(db, config)
}

fn feed_ids(session: &Session, creator_id: u64) -> Vec<u64> {
    session
        .list_feed(creator_id)
        .unwrap()
        .iter()
        .map(|item| item.post.id)
        .collect()
}

fn gallery_ids(session: &Session, conversation_id: u64) -> Vec<u64> {
    session
        .conversations()
        .gallery(conversation_id)
        .unwrap()
        .iter()
        .map(|m| m.id)
        .collect()
}

/// Builtin catalog plus a pinned image post for creator 2.
fn fixtures_with_second_pin() -> Fixtures {
    let mut fixtures = Fixtures::builtin();
    let mut post = fixtures.posts[0].clone();
    post.id = 20;
    post.creator_id = 2;
    post.is_pinned = true;
    fixtures.posts.push(post);
    fixtures
}

#[test]
fn test_delete_ppv_post_removes_it_from_feed() {
    let session = seeded();
    assert_eq!(
        session.feed().get(3).unwrap().ppv_price(),
        Some(Price::from_cents(1000))
    );

    let outcome = session.dispatch(Action::DeletePost { post_id: 3 }).unwrap();
    assert_eq!(outcome, ActionOutcome::PostDeleted { post_id: 3 });
    assert_eq!(feed_ids(&session, 1), vec![1, 2, 4]);

    assert_eq!(
        session.dispatch(Action::DeletePost { post_id: 3 }).unwrap(),
        ActionOutcome::NotFound
    );
}

#[test]
fn test_unlock_adds_message_to_gallery() {
    let session = seeded();
    assert!(!gallery_ids(&session, 1).contains(&3));

    for _ in 0..2 {
        let outcome = session
            .dispatch(Action::UnlockMessage {
                conversation_id: 1,
                message_id: 3,
            })
            .unwrap();
        let ActionOutcome::Message(message) = outcome else {
            panic!("expected the unlocked message");
        };
        assert_eq!(message.unlock_state(), UnlockState::Unlocked);
    }

    assert_eq!(gallery_ids(&session, 1), vec![3]);
    assert_eq!(session.metrics().messages_unlocked, 1);
}

#[test]
fn test_unlocking_text_or_free_messages_is_not_counted() {
    let session = seeded();
    let outcome = session
        .dispatch(Action::UnlockMessage {
            conversation_id: 1,
            message_id: 1,
        })
        .unwrap();
    assert!(matches!(outcome, ActionOutcome::Message(ref m) if m.id == 1));
    assert_eq!(session.metrics().messages_unlocked, 0);
    assert_eq!(session.metrics().mutations_total(), 0);
}

#[test]
fn test_session_over_raw_json_fixtures_issues_fresh_message_ids() {
    let json = serde_json::to_string(&Fixtures::builtin()).unwrap();
    let db = Arc::new(MemoryDatabase::from_fixtures(Fixtures::from_json(&json).unwrap()));
    let session = Session::with_database(db, &Config::default());

    let outcome = session
        .dispatch(Action::SendText {
            conversation_id: 1,
            content: "hi".to_string(),
        })
        .unwrap();
    let ActionOutcome::Message(sent) = outcome else {
        panic!("expected the sent message");
    };
    assert_eq!(sent.id, 5);
    let conversation = session.conversations().get_conversation(1).unwrap();
    assert_eq!(
        conversation.messages.iter().filter(|m| m.id == sent.id).count(),
        1
    );
}

#[test]
fn test_sent_ppv_media_is_unlocked() {
    let session = seeded();
    let outcome = session
        .dispatch(Action::SendMedia {
            conversation_id: 1,
            url: "https://picsum.photos/seed/mine/800/1000".to_string(),
            is_ppv: true,
            price: Some(Price::from_cents(500)),
        })
        .unwrap();
    let ActionOutcome::Message(message) = outcome else {
        panic!("expected the sent message");
    };
    assert_eq!(message.ppv_price(), Some(Price::from_cents(500)));
    assert_eq!(message.unlock_state(), UnlockState::Unlocked);
    assert_eq!(
        session.chat(1).unwrap().messages.last().unwrap().render,
        RenderState::Full
    );
}

#[test]
fn test_pin_twice_restores_every_post() {
    let session = seeded();
    let before = session.snapshot().unwrap().posts;
    session.dispatch(Action::PinPost { post_id: 2 }).unwrap();
    session.dispatch(Action::PinPost { post_id: 2 }).unwrap();
    assert_eq!(session.snapshot().unwrap().posts, before);
}

#[test]
fn test_at_most_one_pin_per_creator() {
    let session = session_with(fixtures_with_second_pin(), &Config::default());
    for post_id in [1, 3, 4, 3, 20, 2] {
        session.dispatch(Action::PinPost { post_id }).unwrap();
        for creator_id in [1, 2] {
            let pinned = session
                .list_feed(creator_id)
                .unwrap()
                .iter()
                .filter(|item| item.post.is_pinned)
                .count();
            assert!(pinned <= 1, "creator {creator_id} has {pinned} pins");
        }
    }
    assert_eq!(feed_ids(&session, 1), vec![2, 1, 3, 4]);
    assert!(!session.feed().get(20).unwrap().is_pinned);
}

#[test]
fn test_pin_scope_decides_other_creators() {
    let session = session_with(fixtures_with_second_pin(), &Config::default());
    session.dispatch(Action::PinPost { post_id: 4 }).unwrap();
    assert!(session.feed().get(20).unwrap().is_pinned);
    assert_eq!(feed_ids(&session, 1), vec![4, 1, 2, 3]);

    let mut config = Config::default();
    config.feed.pin_scope = PinScope::Global;
    let session = session_with(fixtures_with_second_pin(), &config);
    session.dispatch(Action::PinPost { post_id: 4 }).unwrap();
    assert!(!session.feed().get(20).unwrap().is_pinned);
}

#[test]
fn test_like_parity() {
    let session = seeded();
    let initial = session.feed().get(2).unwrap();
    assert!(!initial.is_liked);

    for n in 1..=6u32 {
        session.dispatch(Action::LikePost { post_id: 2 }).unwrap();
        assert_eq!(session.feed().get(2).unwrap().likes, initial.likes + n % 2);
    }
    assert_eq!(session.metrics().likes_toggled, 6);
}

#[test]
fn test_like_never_goes_below_zero() {
    let mut fixtures = Fixtures::builtin();
    fixtures.posts[0].likes = 0;
    fixtures.posts[0].is_liked = true;
    let session = session_with(fixtures, &Config::default());

    session.dispatch(Action::LikePost { post_id: 1 }).unwrap();
    let post = session.feed().get(1).unwrap();
    assert_eq!(post.likes, 0);
    assert!(!post.is_liked);
}

#[test]
fn test_blank_text_send_changes_nothing() {
    let session = seeded();
    let before = session.conversations().get_conversation(2).unwrap();
    let outcome = session
        .dispatch(Action::SendText {
            conversation_id: 2,
            content: " \n\t".to_string(),
        })
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Skipped);
    assert_eq!(session.conversations().get_conversation(2).unwrap(), before);
    assert_eq!(session.metrics().sends_skipped, 1);
}

#[test]
fn test_unread_stays_zero_after_viewer_sends() {
    let session = seeded();
    session
        .dispatch(Action::MarkRead { conversation_id: 1 })
        .unwrap();
    session
        .dispatch(Action::SendText {
            conversation_id: 1,
            content: "Great, thanks!".to_string(),
        })
        .unwrap();
    assert_eq!(
        session.conversations().get_conversation(1).unwrap().unread_count,
        0
    );
}

#[test]
fn test_message_ids_continue_after_gaps() {
    let mut fixtures = Fixtures::builtin();
    fixtures.conversations[1].messages[1].id = 7;
    let session = session_with(fixtures, &Config::default());

    let outcome = session
        .dispatch(Action::SendText {
            conversation_id: 2,
            content: "next".to_string(),
        })
        .unwrap();
    assert!(matches!(outcome, ActionOutcome::Message(ref m) if m.id == 8));
}

#[test]
fn test_subscribe_opens_free_media_only() {
    let mut fixtures = Fixtures::builtin();
    let mut free = fixtures.posts[0].clone();
    free.id = 30;
    free.creator_id = 2;
    let mut ppv = free.clone();
    ppv.id = 31;
    ppv.content = PostContent::Media {
        kind: MediaKind::Image,
        url: "https://picsum.photos/seed/locked/800/1000".to_string(),
        access: PostAccess::PayPerView {
            price: Price::from_cents(1200),
        },
    };
    fixtures.posts.extend([free, ppv]);
    let session = session_with(fixtures, &Config::default());

    let render = |id| {
        let post = session.feed().get(id).unwrap();
        resolve_post(&post, session.viewer_context(2).unwrap())
    };
    assert_eq!(render(30), RenderState::LockedSubscribe);

    session.dispatch(Action::Subscribe { creator_id: 2 }).unwrap();
    session.dispatch(Action::Subscribe { creator_id: 2 }).unwrap();
    assert_eq!(
        session
            .subscriptions()
            .list_subscriptions()
            .unwrap()
            .iter()
            .filter(|s| s.creator.id == 2)
            .count(),
        1
    );
    assert_eq!(render(30), RenderState::Full);
    assert_eq!(
        render(31),
        RenderState::LockedPpv {
            price: Price::from_cents(1200)
        }
    );
}

#[test]
fn test_created_post_leads_the_feed() {
    let session = seeded();
    let outcome = session
        .dispatch(Action::CreatePost {
            creator_id: 1,
            post: CreatePostInput {
                content: NewPostContent::Text {
                    body: "Q&A tonight!".to_string(),
                },
                caption: None,
                price: None,
            },
        })
        .unwrap();
    let ActionOutcome::Post(post) = outcome else {
        panic!("expected the created post");
    };
    assert_eq!(feed_ids(&session, 1), vec![post.id, 1, 2, 3, 4]);
    assert_eq!(session.profile(1).unwrap().stats.posts, "453");
}

#[test]
fn test_invalid_actions_are_errors_not_state_changes() {
    let session = seeded();
    let before = session.snapshot().unwrap().conversations;
    let result = session.dispatch(Action::SendMedia {
        conversation_id: 1,
        url: "https://example.com/a.jpg".to_string(),
        is_ppv: true,
        price: None,
    });
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(session.snapshot().unwrap().conversations, before);
}

#[test]
fn test_snapshot_serializes() {
    let session = seeded();
    session
        .dispatch(Action::OpenConversation { conversation_id: 3 })
        .unwrap();
    let value = serde_json::to_value(session.snapshot().unwrap()).unwrap();
    assert_eq!(value["viewerId"], 1);
    assert_eq!(value["totalUnread"], 2);
    assert_eq!(value["creators"].as_array().unwrap().len(), 6);
    assert_eq!(value["metrics"]["conversations_read"], 1);
}
