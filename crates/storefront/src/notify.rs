//! Transient user notices.
//!
//! Notices are held in a `moka` cache with a time-to-live, so they vanish on
//! their own; pages render whatever is still live.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;

/// Notice shown after a successful add.
pub const ADDED_TO_CART: &str = "✨ Added to cart successfully!";

/// A notice waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Queue of short-lived notices.
#[derive(Clone)]
pub struct Notifier {
    cache: Cache<u64, Notice>,
    next_id: Arc<AtomicU64>,
}

impl Notifier {
    /// Create a notifier whose notices expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(32).time_to_live(ttl).build();

        Self {
            cache,
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue a notice.
    pub async fn push(&self, message: impl Into<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notice = Notice {
            id,
            message: message.into(),
        };
        self.cache.insert(id, notice).await;
    }

    /// Notices that have not expired yet, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notice> {
        let mut notices: Vec<Notice> = self.cache.iter().map(|(_, notice)| notice).collect();
        notices.sort_by_key(|n| n.id);
        notices
    }
}
