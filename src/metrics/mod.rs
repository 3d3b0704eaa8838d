//! Cache Metrics System
//!
//! Counters for cache activity, reported through the [`CacheMetrics`] trait as
//! a `BTreeMap<String, f64>`. A BTreeMap keeps the keys in a fixed order, so
//! two reports can be diffed line by line and test assertions stay stable.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters shared by every cache front end.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups that touch recency (`get`, `get_mut`).
    pub requests: u64,

    /// Lookups that found their key.
    pub cache_hits: u64,

    /// New keys written into the cache.
    pub insertions: u64,

    /// Writes that replaced the value of a key already present.
    pub updates: u64,

    /// Entries dropped to stay within capacity.
    pub evictions: u64,

    /// Entries removed explicitly by key or by `pop_lru`.
    pub removals: u64,

    /// Number of `clear` calls.
    pub clears: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that missed. Misses are derived as
    /// `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a write of a new key.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a write over an existing key.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Records a full reset of the cache contents.
    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    /// Number of lookups that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters and derived rates into a report map.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("clears".to_string(), self.clears as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// A static name identifying the eviction algorithm, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
