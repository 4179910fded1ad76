//! TTL'd cache of the tradable-symbol universe.

use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct CacheSlot {
    symbols: Vec<String>,
    refreshed_at: Option<Instant>,
}

/// Process-wide symbol cache with a fixed freshness window.
///
/// Refreshes are idempotent (the union of all sources overwrites the slot
/// wholesale), so two racing refreshes are harmless and no writer
/// coordination beyond the lock itself is needed.
#[derive(Debug)]
pub struct SymbolCache {
    ttl: Duration,
    slot: RwLock<CacheSlot>,
}

impl SymbolCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(CacheSlot::default()),
        }
    }

    /// True when the cache has never been filled or its contents have aged
    /// past the TTL.
    pub async fn is_stale(&self) -> bool {
        let slot = self.slot.read().await;
        match slot.refreshed_at {
            Some(at) => slot.symbols.is_empty() || at.elapsed() >= self.ttl,
            None => true,
        }
    }

    pub async fn get(&self) -> Vec<String> {
        self.slot.read().await.symbols.clone()
    }

    /// Overwrite the cached universe and restart the freshness window.
    pub async fn store(&self, symbols: Vec<String>) {
        let mut slot = self.slot.write().await;
        slot.symbols = symbols;
        slot.refreshed_at = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_stale() {
        let cache = SymbolCache::new(Duration::from_secs(300));
        assert!(cache.is_stale().await);
        assert!(cache.get().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_makes_fresh() {
        let cache = SymbolCache::new(Duration::from_secs(300));
        cache.store(vec!["BTCUSDT".to_string()]).await;
        assert!(!cache.is_stale().await);
        assert_eq!(cache.get().await, vec!["BTCUSDT".to_string()]);
    }

    #[tokio::test]
    async fn test_zero_ttl_is_always_stale() {
        let cache = SymbolCache::new(Duration::ZERO);
        cache.store(vec!["BTCUSDT".to_string()]).await;
        assert!(cache.is_stale().await);
    }

    #[tokio::test]
    async fn test_empty_store_stays_stale() {
        let cache = SymbolCache::new(Duration::from_secs(300));
        cache.store(Vec::new()).await;
        assert!(cache.is_stale().await);
    }
}
