//! A single cached value with sliding and absolute deadlines.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use super::config::{CacheConfig, CachePriority};

/// Which clock retired an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    Sliding,
    Absolute,
}

impl Expiry {
    pub fn as_str(self) -> &'static str {
        match self {
            Expiry::Sliding => "sliding",
            Expiry::Absolute => "absolute",
        }
    }
}

/// Cached payload plus its two independent expiration clocks.
#[derive(Debug)]
pub struct CacheEntry<T> {
    payload: Arc<T>,
    last_access: Instant,
    sliding: Duration,
    absolute_deadline: Instant,
    priority: CachePriority,
}

impl<T> CacheEntry<T> {
    pub fn new(payload: Arc<T>, now: Instant, config: &CacheConfig) -> Self {
        Self {
            payload,
            last_access: now,
            sliding: config.sliding_expiration,
            absolute_deadline: now + config.absolute_expiration,
            priority: config.priority,
        }
    }

    pub fn payload(&self) -> Arc<T> {
        Arc::clone(&self.payload)
    }

    pub fn sliding_deadline(&self) -> Instant {
        self.last_access + self.sliding
    }

    pub fn absolute_deadline(&self) -> Instant {
        self.absolute_deadline
    }

    pub fn priority(&self) -> CachePriority {
        self.priority
    }

    /// `None` while both clocks are running; otherwise the clock that fired.
    /// The absolute clock wins a tie.
    pub fn expiry(&self, now: Instant) -> Option<Expiry> {
        if now >= self.absolute_deadline {
            Some(Expiry::Absolute)
        } else if now >= self.sliding_deadline() {
            Some(Expiry::Sliding)
        } else {
            None
        }
    }

    /// Record an access, pushing the sliding deadline forward.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(now: Instant) -> CacheEntry<u8> {
        CacheEntry::new(Arc::new(1), now, &CacheConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_entry_is_live() {
        let now = Instant::now();
        let entry = entry_at(now);
        assert_eq!(entry.expiry(now), None);
        assert_eq!(entry.sliding_deadline(), now + Duration::from_secs(45));
        assert_eq!(entry.absolute_deadline(), now + Duration::from_secs(3600));
        assert_eq!(entry.priority(), CachePriority::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_entry_expires_by_sliding_clock() {
        let now = Instant::now();
        let entry = entry_at(now);
        assert_eq!(entry.expiry(now + Duration::from_secs(44)), None);
        assert_eq!(
            entry.expiry(now + Duration::from_secs(45)),
            Some(Expiry::Sliding)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn touch_does_not_extend_absolute_clock() {
        let start = Instant::now();
        let mut entry = entry_at(start);
        let late = start + Duration::from_secs(3590);
        entry.touch(late);
        assert_eq!(entry.expiry(late + Duration::from_secs(5)), None);
        assert_eq!(
            entry.expiry(start + Duration::from_secs(3600)),
            Some(Expiry::Absolute)
        );
    }
}
