//! Post repository.

use std::sync::Arc;

use crate::MemoryDatabase;
use crate::entities::Post;
use fanvault_common::{AppError, AppResult};

/// Post repository for feed operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<MemoryDatabase>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }

    /// List every post in storage order (newest first).
    pub fn find_all(&self) -> AppResult<Vec<Post>> {
        Ok(self.db.posts.read()?.clone())
    }

    /// Find a post by ID.
    pub fn find_by_id(&self, id: u64) -> AppResult<Option<Post>> {
        Ok(self.db.posts.read()?.iter().find(|p| p.id == id).cloned())
    }

    /// Find a post by ID, returning an error if not found.
    pub fn get_by_id(&self, id: u64) -> AppResult<Post> {
        self.find_by_id(id)?.ok_or(AppError::PostNotFound(id))
    }

    /// List a creator's posts in storage order.
    pub fn find_by_creator(&self, creator_id: u64) -> AppResult<Vec<Post>> {
        Ok(self
            .db
            .posts
            .read()?
            .iter()
            .filter(|p| p.creator_id == creator_id)
            .cloned()
            .collect())
    }

    /// Reserve an id for a new post.
    pub fn next_id(&self) -> AppResult<u64> {
        self.db.next_post_id()
    }

    /// Insert a post ahead of all existing posts.
    pub fn insert_front(&self, post: Post) -> AppResult<Post> {
        self.db.posts.write()?.insert(0, post.clone());
        Ok(post)
    }

    /// Remove a post permanently. Returns whether a row was removed.
    pub fn delete(&self, id: u64) -> AppResult<bool> {
        let mut posts = self.db.posts.write()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    /// Apply `f` to a post in place. Returns `None` if the post does not exist.
    pub fn update<R>(&self, id: u64, f: impl FnOnce(&mut Post) -> R) -> AppResult<Option<R>> {
        let mut posts = self.db.posts.write()?;
        Ok(posts.iter_mut().find(|p| p.id == id).map(f))
    }

    /// Apply `f` to every post under a single write lock.
    pub fn update_all(&self, mut f: impl FnMut(&mut Post)) -> AppResult<()> {
        let mut posts = self.db.posts.write()?;
        posts.iter_mut().for_each(&mut f);
        Ok(())
    }
}
