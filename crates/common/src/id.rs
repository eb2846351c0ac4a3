//! ID generation utilities.

use serde::{Deserialize, Serialize};

/// Monotonic numeric id sequence.
///
/// Every issued id is strictly greater than every id the sequence has seen, so ids stay
/// unique even after entities are removed from the collection they were issued for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// Create a sequence whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Create a sequence that continues after the largest of `ids`.
    #[must_use]
    pub fn after<I: IntoIterator<Item = u64>>(ids: I) -> Self {
        Self {
            last: ids.into_iter().max().unwrap_or(0),
        }
    }

    /// Issue the next id.
    pub const fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}
