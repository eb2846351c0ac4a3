//! Subscription service.
//!
//! Subscribing is a local state flip: nothing is charged and renewal dates are never
//! enforced.

use chrono::{Days, Local, NaiveDate};
use fanvault_common::{AppError, AppResult};
use fanvault_db::{
    entities::{Creator, Subscription},
    repositories::{CreatorRepository, SubscriptionRepository},
};
use serde::Serialize;
use tracing::{debug, info};

/// A subscription joined with its creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSubscription {
    pub creator: Creator,
    pub renewal_date: NaiveDate,
}

/// Subscription service.
#[derive(Clone)]
pub struct SubscriptionService {
    subscription_repo: SubscriptionRepository,
    creator_repo: CreatorRepository,
    renewal_days: u32,
}

impl SubscriptionService {
    /// Create a new subscription service.
    #[must_use]
    pub const fn new(
        subscription_repo: SubscriptionRepository,
        creator_repo: CreatorRepository,
        renewal_days: u32,
    ) -> Self {
        Self {
            subscription_repo,
            creator_repo,
            renewal_days,
        }
    }

    /// Whether the viewer is subscribed to a creator.
    pub fn is_subscribed(&self, creator_id: u64) -> AppResult<bool> {
        self.subscription_repo.exists(creator_id)
    }

    /// Active subscriptions with their creators. Dangling rows are skipped.
    pub fn list_subscriptions(&self) -> AppResult<Vec<ActiveSubscription>> {
        let mut active = Vec::new();
        for subscription in self.subscription_repo.find_all()? {
            if let Some(creator) = self.creator_repo.find_by_id(subscription.creator_id)? {
                active.push(ActiveSubscription {
                    creator,
                    renewal_date: subscription.renewal_date,
                });
            }
        }
        Ok(active)
    }

    /// Subscribe to a creator, renewing `renewal_days` from today.
    pub fn subscribe(&self, creator_id: u64) -> AppResult<Subscription> {
        self.subscribe_on(creator_id, Local::now().date_naive())
    }

    /// Subscribe as of a given day. Subscribing twice keeps the first subscription.
    pub fn subscribe_on(&self, creator_id: u64, today: NaiveDate) -> AppResult<Subscription> {
        if !self.creator_repo.exists(creator_id)? {
            return Err(AppError::CreatorNotFound(creator_id));
        }
        if let Some(existing) = self.subscription_repo.find_by_creator(creator_id)? {
            debug!(creator_id, "Already subscribed");
            return Ok(existing);
        }

        let renewal_date = today
            .checked_add_days(Days::new(u64::from(self.renewal_days)))
            .ok_or_else(|| AppError::Internal("renewal date out of range".to_string()))?;
        let subscription = Subscription {
            creator_id,
            renewal_date,
        };

        self.subscription_repo.insert(subscription.clone())?;
        self.creator_repo
            .update(creator_id, |c| c.subscriber_count = c.subscriber_count.saturating_add(1))?;

        info!(creator_id, %renewal_date, "Subscribed");
        Ok(subscription)
    }

    /// Cancel the subscription to a creator. Returns whether one existed.
    pub fn cancel(&self, creator_id: u64) -> AppResult<bool> {
        let removed = self.subscription_repo.delete(creator_id)?;
        if removed {
            self.creator_repo
                .update(creator_id, |c| c.subscriber_count = c.subscriber_count.saturating_sub(1))?;
            info!(creator_id, "Cancelled subscription");
        } else {
            debug!(creator_id, "Cancel skipped: not subscribed");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanvault_db::{MemoryDatabase, fixtures::Fixtures};
    use std::sync::Arc;

    fn service() -> SubscriptionService {
        let db = Arc::new(MemoryDatabase::from_fixtures(Fixtures::builtin()));
        SubscriptionService::new(
            SubscriptionRepository::new(db.clone()),
            CreatorRepository::new(db),
            30,
        )
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_list_subscriptions() {
        let names: Vec<String> = service()
            .list_subscriptions()
            .unwrap()
            .into_iter()
            .map(|s| s.creator.name)
            .collect();
        assert_eq!(names, vec!["Seraphina", "Aurora", "Mia"]);
    }

    #[test]
    fn test_subscribe_sets_renewal_and_counts() {
        let service = service();
        let subscription = service.subscribe_on(2, day(2024, 8, 10)).unwrap();
        assert_eq!(subscription.renewal_date, day(2024, 9, 9));
        assert!(service.is_subscribed(2).unwrap());
        assert_eq!(service.creator_repo.get_by_id(2).unwrap().subscriber_count, 19_801);
    }

    #[test]
    fn test_subscribe_twice_keeps_one() {
        let service = service();
        service.subscribe_on(2, day(2024, 8, 10)).unwrap();
        let again = service.subscribe_on(2, day(2024, 8, 20)).unwrap();
        assert_eq!(again.renewal_date, day(2024, 9, 9));
        assert_eq!(service.list_subscriptions().unwrap().len(), 4);
        assert_eq!(service.creator_repo.get_by_id(2).unwrap().subscriber_count, 19_801);
    }

    #[test]
    fn test_subscribe_unknown_creator() {
        assert!(matches!(
            service().subscribe_on(77, day(2024, 1, 1)),
            Err(AppError::CreatorNotFound(77))
        ));
    }

    #[test]
    fn test_cancel() {
        let service = service();
        assert!(service.cancel(3).unwrap());
        assert!(!service.cancel(3).unwrap());
        assert!(!service.is_subscribed(3).unwrap());
        assert_eq!(service.creator_repo.get_by_id(3).unwrap().subscriber_count, 42_299);
    }
}
