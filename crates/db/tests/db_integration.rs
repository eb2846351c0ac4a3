//! Database integration tests.
//!
//! These tests seed the in-memory database from fixture files on disk and drive the
//! repositories against it.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use fanvault_common::{AppError, Config};
use fanvault_db::{
    fixtures::Fixtures,
    init,
    repositories::{ConversationRepository, PostRepository, SubscriptionRepository},
};
use serde_json::json;

/// Write a fixture document to a per-test file under the system temp dir.
fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "fanvault-{name}-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

fn config_for(path: PathBuf) -> Config {
    let mut config = Config::default();
    config.session.fixtures_path = Some(path);
    config
}

#[test]
fn test_builtin_fixtures_round_trip_through_file() {
    let builtin = Fixtures::builtin();
    let path = write_fixture("round-trip", &serde_json::to_string(&builtin).unwrap());

    let db = init(&config_for(path.clone())).unwrap();
    assert_eq!(*db.creators.read().unwrap(), builtin.creators);
    assert_eq!(*db.posts.read().unwrap(), builtin.posts);
    assert_eq!(*db.conversations.read().unwrap(), builtin.conversations);
    assert_eq!(*db.subscriptions.read().unwrap(), builtin.subscriptions);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_fixture_with_unknown_creator_is_rejected() {
    let mut fixtures = Fixtures::builtin();
    fixtures.posts[0].creator_id = 404;
    let path = write_fixture("unknown-creator", &serde_json::to_string(&fixtures).unwrap());

    let err = init(&config_for(path.clone())).unwrap_err();
    assert!(matches!(err, AppError::Fixture(ref msg) if msg.contains("404")));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_malformed_fixture_is_rejected() {
    let path = write_fixture("malformed", "{ \"creators\": [ { \"id\": \"one\" } ] }");
    let err = init(&config_for(path.clone())).unwrap_err();
    assert_eq!(err.error_code(), "FIXTURE_ERROR");
    std::fs::remove_file(path).ok();
}

#[test]
fn test_minimal_fixture_seeds_empty_collections() {
    let document = json!({
        "creators": [{
            "id": 1,
            "name": "Solo",
            "age": 30,
            "location": "Nowhere",
            "isOnline": false,
            "profilePicture": "https://example.com/p.jpg",
            "bannerPicture": "https://example.com/b.jpg",
            "bio": "",
            "stats": { "likes": 0, "comments": 0, "views": 0, "posts": 0 },
            "subscriberCount": 0,
            "subscriptionPrice": 0
        }],
        "conversations": [{
            "id": 1,
            "creatorId": 1,
            "unreadCount": 1,
            "messages": [
                { "id": 4, "sender": "MODEL", "timestamp": "now",
                  "body": { "type": "TEXT", "content": "hi" } }
            ]
        }]
    });
    let path = write_fixture("minimal", &document.to_string());
    let db = init(&config_for(path.clone())).unwrap();

    assert!(PostRepository::new(db.clone()).find_all().unwrap().is_empty());
    assert!(SubscriptionRepository::new(db.clone()).find_all().unwrap().is_empty());

    let conversations = ConversationRepository::new(db.clone());
    assert_eq!(conversations.total_unread().unwrap(), 1);
    let next = conversations
        .update(1, |c| c.next_message_id())
        .unwrap()
        .unwrap();
    assert_eq!(next, 5);
    assert_eq!(db.next_post_id().unwrap(), 1);

    std::fs::remove_file(path).ok();
}
