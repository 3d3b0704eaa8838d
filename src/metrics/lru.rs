//! LRU Cache Metrics

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics for the LRU cache: the core counters plus the live entry count
/// and capacity at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache front ends.
    pub core: CoreCacheMetrics,
    /// Number of entries currently stored.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

impl LruCacheMetrics {
    /// Fraction of the capacity in use.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.len as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("len".to_string(), self.len as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("utilization".to_string(), self.utilization());
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_metrics_report() {
        let mut metrics = LruCacheMetrics {
            core: CoreCacheMetrics::new(),
            len: 1,
            capacity: 4,
        };
        metrics.core.record_insertion();

        let report = metrics.metrics();
        assert_eq!(report.get("len"), Some(&1.0));
        assert_eq!(report.get("capacity"), Some(&4.0));
        assert_eq!(report.get("utilization"), Some(&0.25));
        assert_eq!(report.get("insertions"), Some(&1.0));
        assert_eq!(metrics.algorithm_name(), "LRU");
    }
}
