//! Storage layer for fanvault.
//!
//! All state lives in memory for the lifetime of a session. Tables are seeded from
//! [`fixtures::Fixtures`] and mutated only through the repositories.

pub mod entities;
pub mod fixtures;
pub mod repositories;

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use entities::{Conversation, Creator, Post, Subscription};
use fanvault_common::{AppError, AppResult, Config, IdSequence};
use fixtures::Fixtures;
use tracing::info;

/// One named collection of rows.
#[derive(Debug)]
pub struct Table<T> {
    name: &'static str,
    rows: RwLock<Vec<T>>,
}

impl<T> Table<T> {
    fn new(name: &'static str, rows: Vec<T>) -> Self {
        Self {
            name,
            rows: RwLock::new(rows),
        }
    }

    /// Acquire shared access to the rows.
    pub fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<T>>> {
        self.rows
            .read()
            .map_err(|_| AppError::Database(format!("{} table lock poisoned", self.name)))
    }

    /// Acquire exclusive access to the rows.
    pub fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.rows
            .write()
            .map_err(|_| AppError::Database(format!("{} table lock poisoned", self.name)))
    }
}

/// The in-memory database backing a session.
#[derive(Debug)]
pub struct MemoryDatabase {
    pub creators: Table<Creator>,
    pub posts: Table<Post>,
    pub conversations: Table<Conversation>,
    pub subscriptions: Table<Subscription>,
    post_ids: Mutex<IdSequence>,
}

impl MemoryDatabase {
    /// Build a database from fixtures.
    ///
    /// Message id sequences and sender invariants are rebuilt here, so fixtures read
    /// straight from JSON are safe to use. Referential checks stay in
    /// [`Fixtures::validated`].
    #[must_use]
    pub fn from_fixtures(mut fixtures: Fixtures) -> Self {
        for conversation in &mut fixtures.conversations {
            conversation.normalize();
        }
        let post_ids = IdSequence::after(fixtures.posts.iter().map(|p| p.id));
        Self {
            creators: Table::new("creator", fixtures.creators),
            posts: Table::new("post", fixtures.posts),
            conversations: Table::new("conversation", fixtures.conversations),
            subscriptions: Table::new("subscription", fixtures.subscriptions),
            post_ids: Mutex::new(post_ids),
        }
    }

    /// Reserve the next post id.
    pub fn next_post_id(&self) -> AppResult<u64> {
        let mut ids = self
            .post_ids
            .lock()
            .map_err(|_| AppError::Database("post id sequence lock poisoned".to_string()))?;
        Ok(ids.next_id())
    }
}

/// Initialize the database from configuration.
///
/// Uses `session.fixtures_path` when set, otherwise the built-in fixtures.
pub fn init(config: &Config) -> AppResult<Arc<MemoryDatabase>> {
    let fixtures = match &config.session.fixtures_path {
        Some(path) => Fixtures::from_path(path)?,
        None => Fixtures::builtin(),
    };
    let fixtures = fixtures.validated()?;

    info!(
        creators = fixtures.creators.len(),
        posts = fixtures.posts.len(),
        conversations = fixtures.conversations.len(),
        subscriptions = fixtures.subscriptions.len(),
        "Seeded in-memory database"
    );

    Ok(Arc::new(MemoryDatabase::from_fixtures(fixtures)))
}
