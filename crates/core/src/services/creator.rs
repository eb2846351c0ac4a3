//! Creator catalog service.

use fanvault_common::{AppError, AppResult, format_stat};
use fanvault_db::{entities::Creator, repositories::CreatorRepository};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub bio: Option<String>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 2048))]
    pub profile_picture: Option<String>,

    #[validate(length(min = 1, max = 2048))]
    pub banner_picture: Option<String>,
}

/// Compact profile header counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub posts: String,
    pub subscribers: String,
    pub likes: String,
}

/// Creator catalog service.
#[derive(Clone)]
pub struct CreatorService {
    creator_repo: CreatorRepository,
}

impl CreatorService {
    /// Create a new creator service.
    #[must_use]
    pub const fn new(creator_repo: CreatorRepository) -> Self {
        Self { creator_repo }
    }

    /// List every creator.
    pub fn list_creators(&self) -> AppResult<Vec<Creator>> {
        self.creator_repo.find_all()
    }

    /// Get a creator by ID.
    pub fn get_creator(&self, creator_id: u64) -> AppResult<Creator> {
        self.creator_repo.get_by_id(creator_id)
    }

    /// Apply a partial profile update.
    pub fn update_profile(&self, creator_id: u64, input: UpdateProfileInput) -> AppResult<Creator> {
        input.validate()?;

        let updated = self.creator_repo.update(creator_id, |creator| {
            if let Some(name) = input.name {
                creator.name = name;
            }
            if let Some(bio) = input.bio {
                creator.bio = bio;
            }
            if let Some(location) = input.location {
                creator.location = location;
            }
            if let Some(picture) = input.profile_picture {
                creator.profile_picture = picture;
            }
            if let Some(banner) = input.banner_picture {
                creator.banner_picture = banner;
            }
            creator.clone()
        })?;

        let creator = updated.ok_or(AppError::CreatorNotFound(creator_id))?;
        info!(creator_id, "Updated profile");
        Ok(creator)
    }

    /// Profile header counters for a creator.
    #[must_use]
    pub fn profile_stats(creator: &Creator) -> ProfileStats {
        ProfileStats {
            posts: format_stat(creator.stats.posts),
            subscribers: format_stat(creator.subscriber_count),
            likes: format_stat(creator.stats.likes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanvault_db::{MemoryDatabase, fixtures::Fixtures};
    use std::sync::Arc;

    fn service() -> CreatorService {
        let db = Arc::new(MemoryDatabase::from_fixtures(Fixtures::builtin()));
        CreatorService::new(CreatorRepository::new(db))
    }

    #[test]
    fn test_list_and_get() {
        let service = service();
        assert_eq!(service.list_creators().unwrap().len(), 6);
        assert_eq!(service.get_creator(3).unwrap().name, "Aurora");
        assert!(service.get_creator(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_profile_partial() {
        let service = service();
        let creator = service
            .update_profile(
                1,
                UpdateProfileInput {
                    bio: Some("New bio".to_string()),
                    location: Some("Lisbon".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(creator.name, "Seraphina");
        assert_eq!(creator.bio, "New bio");
        assert_eq!(creator.location, "Lisbon");
        assert_eq!(service.get_creator(1).unwrap(), creator);
    }

    #[test]
    fn test_update_profile_rejects_empty_name() {
        let result = service().update_profile(
            1,
            UpdateProfileInput {
                name: Some(String::new()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_profile_unknown_creator() {
        let result = service().update_profile(9, UpdateProfileInput::default());
        assert!(matches!(result, Err(AppError::CreatorNotFound(9))));
    }

    #[test]
    fn test_profile_stats() {
        let creator = service().get_creator(1).unwrap();
        let stats = CreatorService::profile_stats(&creator);
        assert_eq!(stats.posts, "452");
        assert_eq!(stats.subscribers, "25.6K");
        assert_eq!(stats.likes, "1.2M");
    }
}
