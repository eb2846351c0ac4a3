//! Session metrics for fanvault.
//!
//! Counts state transitions applied to a session so a run can be summarised
//! without walking every collection.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Session metrics collector.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    // === Feed Metrics ===
    /// Posts created
    pub posts_created: AtomicU64,
    /// Posts deleted
    pub posts_deleted: AtomicU64,
    /// Post captions edited
    pub posts_edited: AtomicU64,
    /// Like toggles applied
    pub likes_toggled: AtomicU64,
    /// Pin toggles applied
    pub pins_toggled: AtomicU64,

    // === Messaging Metrics ===
    /// Messages sent by the viewer
    pub messages_sent: AtomicU64,
    /// PPV messages unlocked
    pub messages_unlocked: AtomicU64,
    /// Conversations marked read
    pub conversations_read: AtomicU64,
    /// Empty sends that were dropped
    pub sends_skipped: AtomicU64,

    // === Subscription Metrics ===
    /// Subscriptions started
    pub subscriptions_started: AtomicU64,
    /// Subscriptions cancelled
    pub subscriptions_cancelled: AtomicU64,

    // === Lookup Metrics ===
    /// Operations that referenced a missing id
    pub not_found_total: AtomicU64,
}

impl SessionMetrics {
    /// Create a new metrics instance with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            posts_created: AtomicU64::new(0),
            posts_deleted: AtomicU64::new(0),
            posts_edited: AtomicU64::new(0),
            likes_toggled: AtomicU64::new(0),
            pins_toggled: AtomicU64::new(0),

            messages_sent: AtomicU64::new(0),
            messages_unlocked: AtomicU64::new(0),
            conversations_read: AtomicU64::new(0),
            sends_skipped: AtomicU64::new(0),

            subscriptions_started: AtomicU64::new(0),
            subscriptions_cancelled: AtomicU64::new(0),

            not_found_total: AtomicU64::new(0),
        }
    }

    /// Increment a counter by one.
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an operation that referenced a missing id.
    pub fn record_not_found(&self) {
        Self::incr(&self.not_found_total);
    }

    /// Take a point-in-time copy of every counter.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        MetricsSnapshot {
            posts_created: load(&self.posts_created),
            posts_deleted: load(&self.posts_deleted),
            posts_edited: load(&self.posts_edited),
            likes_toggled: load(&self.likes_toggled),
            pins_toggled: load(&self.pins_toggled),
            messages_sent: load(&self.messages_sent),
            messages_unlocked: load(&self.messages_unlocked),
            conversations_read: load(&self.conversations_read),
            sends_skipped: load(&self.sends_skipped),
            subscriptions_started: load(&self.subscriptions_started),
            subscriptions_cancelled: load(&self.subscriptions_cancelled),
            not_found_total: load(&self.not_found_total),
        }
    }
}

/// Snapshot of session metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub posts_created: u64,
    pub posts_deleted: u64,
    pub posts_edited: u64,
    pub likes_toggled: u64,
    pub pins_toggled: u64,
    pub messages_sent: u64,
    pub messages_unlocked: u64,
    pub conversations_read: u64,
    pub sends_skipped: u64,
    pub subscriptions_started: u64,
    pub subscriptions_cancelled: u64,
    pub not_found_total: u64,
}

impl MetricsSnapshot {
    /// Total number of state-changing operations applied.
    #[must_use]
    pub const fn mutations_total(&self) -> u64 {
        self.posts_created
            + self.posts_deleted
            + self.posts_edited
            + self.likes_toggled
            + self.pins_toggled
            + self.messages_sent
            + self.messages_unlocked
            + self.conversations_read
            + self.subscriptions_started
            + self.subscriptions_cancelled
    }
}
