//! Creator entity.

use fanvault_common::Price;
use serde::{Deserialize, Serialize};

/// Aggregate engagement counters shown on a creator's profile.
///
/// These are seeded values; deleting a post does not recompute them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorStats {
    pub likes: u64,
    pub comments: u64,
    pub views: u64,
    pub posts: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: u64,

    /// Display name
    pub name: String,

    pub age: u8,

    /// Free-form location label ("5 miles away")
    pub location: String,

    #[serde(default)]
    pub is_online: bool,

    /// Avatar URL
    pub profile_picture: String,

    /// Banner URL
    pub banner_picture: String,

    /// Profile description
    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub stats: CreatorStats,

    #[serde(default)]
    pub subscriber_count: u64,

    /// Price of one day of subscription
    pub subscription_price: Price,
}
