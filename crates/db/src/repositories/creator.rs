//! Creator repository.

use std::sync::Arc;

use crate::MemoryDatabase;
use crate::entities::Creator;
use fanvault_common::{AppError, AppResult};

/// Creator repository for catalog operations.
#[derive(Clone)]
pub struct CreatorRepository {
    db: Arc<MemoryDatabase>,
}

impl CreatorRepository {
    /// Create a new creator repository.
    #[must_use]
    pub const fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }

    /// List every creator in catalog order.
    pub fn find_all(&self) -> AppResult<Vec<Creator>> {
        Ok(self.db.creators.read()?.clone())
    }

    /// Find a creator by ID.
    pub fn find_by_id(&self, id: u64) -> AppResult<Option<Creator>> {
        Ok(self.db.creators.read()?.iter().find(|c| c.id == id).cloned())
    }

    /// Find a creator by ID, returning an error if not found.
    pub fn get_by_id(&self, id: u64) -> AppResult<Creator> {
        self.find_by_id(id)?.ok_or(AppError::CreatorNotFound(id))
    }

    /// Whether a creator exists.
    pub fn exists(&self, id: u64) -> AppResult<bool> {
        Ok(self.db.creators.read()?.iter().any(|c| c.id == id))
    }

    /// Apply `f` to a creator in place. Returns `None` if the creator does not exist.
    pub fn update<R>(&self, id: u64, f: impl FnOnce(&mut Creator) -> R) -> AppResult<Option<R>> {
        let mut creators = self.db.creators.write()?;
        Ok(creators.iter_mut().find(|c| c.id == id).map(f))
    }
}
