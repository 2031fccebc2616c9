//! Single-entry cache-aside slot.

use std::future::Future;
use std::sync::Arc;

use metrics::counter;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::types::CatalogKind;

use super::config::CacheConfig;
use super::entry::CacheEntry;

/// Holds at most one cached value for one catalog.
///
/// The slot mutex is held across the loader call, so a load and an
/// invalidation of the same catalog never interleave: an invalidation issued
/// while a load is in flight runs after the load has stored its result and
/// removes it.
pub struct CacheSlot<T> {
    kind: CatalogKind,
    config: CacheConfig,
    entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T> CacheSlot<T> {
    pub fn new(kind: CatalogKind, config: CacheConfig) -> Self {
        Self {
            kind,
            config,
            entry: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Return the cached value if it is still live, otherwise run `loader`,
    /// cache its result, and return that.
    ///
    /// A failing loader leaves the slot empty and its error is returned as is.
    pub async fn get_or_load<F, Fut, E>(&self, loader: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.entry.lock().await;
        let now = Instant::now();

        if let Some(entry) = slot.as_mut() {
            match entry.expiry(now) {
                None => {
                    entry.touch(now);
                    counter!("carapp_cache_hit_total", "catalog" => self.kind.as_str())
                        .increment(1);
                    debug!(catalog = %self.kind, "catalog listing served from cache");
                    return Ok(entry.payload());
                }
                Some(reason) => {
                    debug!(
                        catalog = %self.kind,
                        expiry = reason.as_str(),
                        "cached catalog listing expired"
                    );
                }
            }
        }

        slot.take();
        counter!("carapp_cache_miss_total", "catalog" => self.kind.as_str()).increment(1);
        debug!(catalog = %self.kind, "catalog listing not found in cache");

        let payload = Arc::new(loader().await?);
        *slot = Some(CacheEntry::new(
            Arc::clone(&payload),
            Instant::now(),
            &self.config,
        ));
        Ok(payload)
    }

    /// Drop the cached value whatever its state. No-op when empty.
    pub async fn invalidate(&self) {
        let removed = self.entry.lock().await.take();
        counter!("carapp_cache_invalidate_total", "catalog" => self.kind.as_str()).increment(1);
        debug!(
            catalog = %self.kind,
            removed = removed.is_some(),
            "catalog cache invalidated"
        );
    }

    /// Whether a live entry is present. Does not count as an access.
    pub async fn is_cached(&self) -> bool {
        let now = Instant::now();
        self.entry
            .lock()
            .await
            .as_ref()
            .is_some_and(|entry| entry.expiry(now).is_none())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn slot() -> CacheSlot<Vec<&'static str>> {
        CacheSlot::new(CatalogKind::Body, CacheConfig::default())
    }

    async fn load(
        slot: &CacheSlot<Vec<&'static str>>,
        calls: &AtomicUsize,
    ) -> Arc<Vec<&'static str>> {
        slot.get_or_load(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, std::convert::Infallible>(vec!["Sedan", "SUV"])
        })
        .await
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn second_read_within_window_is_served_from_cache() {
        let slot = slot();
        let calls = AtomicUsize::new(0);

        let first = load(&slot, &calls).await;
        tokio::time::advance(Duration::from_secs(30)).await;
        let second = load(&slot, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_past_sliding_window_reloads() {
        let slot = slot();
        let calls = AtomicUsize::new(0);

        load(&slot, &calls).await;
        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(!slot.is_cached().await);
        load(&slot, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn steady_access_still_expires_at_absolute_deadline() {
        let slot = slot();
        let calls = AtomicUsize::new(0);

        load(&slot, &calls).await;
        // 89 reads 40s apart keep the sliding clock alive up to 3560s.
        for _ in 0..89 {
            tokio::time::advance(Duration::from_secs(40)).await;
            load(&slot, &calls).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(40)).await;
        load(&slot, &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_on_empty_slot_is_noop() {
        let slot = slot();
        slot.invalidate().await;
        slot.invalidate().await;
        assert!(!slot.is_cached().await);
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let slot = slot();
        let calls = AtomicUsize::new(0);

        load(&slot, &calls).await;
        assert!(slot.is_cached().await);
        slot.invalidate().await;
        load(&slot, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_load_caches_nothing() {
        let slot = slot();
        let result = slot
            .get_or_load(|| async { Err::<Vec<&'static str>, _>("store down") })
            .await;
        assert_eq!(result.unwrap_err(), "store down");
        assert!(!slot.is_cached().await);
    }

    #[tokio::test]
    async fn invalidation_during_load_is_not_lost() {
        let slot = Arc::new(slot());
        let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

        let loader_slot = slot.clone();
        let load = tokio::spawn(async move {
            loader_slot
                .get_or_load(|| async move {
                    let _ = started_tx.send(());
                    let _ = release_rx.await;
                    Ok::<_, std::convert::Infallible>(vec!["stale"])
                })
                .await
        });

        started_rx.await.unwrap();
        let invalidator = slot.clone();
        let invalidate = tokio::spawn(async move { invalidator.invalidate().await });
        tokio::task::yield_now().await;
        release_tx.send(()).unwrap();

        load.await.unwrap().unwrap();
        invalidate.await.unwrap();
        assert!(!slot.is_cached().await);
    }
}
