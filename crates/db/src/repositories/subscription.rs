//! Subscription repository.

use std::sync::Arc;

use crate::MemoryDatabase;
use crate::entities::Subscription;
use fanvault_common::AppResult;

/// Subscription repository.
#[derive(Clone)]
pub struct SubscriptionRepository {
    db: Arc<MemoryDatabase>,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }

    /// List every active subscription.
    pub fn find_all(&self) -> AppResult<Vec<Subscription>> {
        Ok(self.db.subscriptions.read()?.clone())
    }

    /// Find the subscription to a creator.
    pub fn find_by_creator(&self, creator_id: u64) -> AppResult<Option<Subscription>> {
        Ok(self
            .db
            .subscriptions
            .read()?
            .iter()
            .find(|s| s.creator_id == creator_id)
            .cloned())
    }

    /// Whether the viewer is subscribed to a creator.
    pub fn exists(&self, creator_id: u64) -> AppResult<bool> {
        Ok(self
            .db
            .subscriptions
            .read()?
            .iter()
            .any(|s| s.creator_id == creator_id))
    }

    /// Insert a subscription unless one for the same creator exists.
    /// Returns whether a row was added.
    pub fn insert(&self, subscription: Subscription) -> AppResult<bool> {
        let mut subscriptions = self.db.subscriptions.write()?;
        if subscriptions
            .iter()
            .any(|s| s.creator_id == subscription.creator_id)
        {
            return Ok(false);
        }
        subscriptions.push(subscription);
        Ok(true)
    }

    /// Remove the subscription to a creator. Returns whether a row was removed.
    pub fn delete(&self, creator_id: u64) -> AppResult<bool> {
        let mut subscriptions = self.db.subscriptions.write()?;
        let before = subscriptions.len();
        subscriptions.retain(|s| s.creator_id != creator_id);
        Ok(subscriptions.len() != before)
    }
}
