use crate::modules::market::domain::PricePoint;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    points: Vec<PricePoint>,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
}

/// Per-item chart series with a fixed TTL. Keys are exact item names,
/// since the backend matches price history by equality.
#[derive(Debug)]
pub struct PriceHistoryCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PriceHistoryCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, item_name: &str) -> Option<Vec<PricePoint>> {
        if let Some(entry) = self.entries.get(item_name) {
            if !entry.is_expired(self.ttl) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Price history cache hit for '{}'", item_name);
                return Some(entry.points.clone());
            }
        }

        // Expired entries are dropped outside the read guard
        self.entries
            .remove_if(item_name, |_, entry| entry.is_expired(self.ttl));
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, item_name: &str, points: Vec<PricePoint>) {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(item_name) {
            self.evict_oldest();
        }
        self.entries.insert(
            item_name.to_string(),
            CacheEntry {
                points,
                created_at: Instant::now(),
            },
        );
    }

    /// Drop every series, logging how the cache served since the last clear
    pub fn invalidate_all(&self) {
        let stats = self.stats();
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!(
            "Price history cache cleared ({} entries, {} hits, {} misses)",
            stats.entries_count, stats.hits, stats.misses
        );
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.entries.len(),
        }
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().created_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            debug!("Evicted price history for '{}'", key);
        }
    }
}
