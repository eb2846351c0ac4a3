//! Subscription entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The viewer's active subscription to one creator.
///
/// Expiry is not enforced; presence alone opens the creator's non-PPV posts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub creator_id: u64,

    pub renewal_date: NaiveDate,
}
