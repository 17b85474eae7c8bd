//! Cache Statistics Module
//!
//! Counts what the cache-aside helpers observed: hits, misses, writes and
//! invalidated keys.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Helper Stats ==
/// Lock-free counters shared by every caller of the helpers.
#[derive(Debug, Default)]
pub struct HelperStats {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    invalidated: AtomicU64,
}

impl HelperStats {
    // == Constructor ==
    /// Creates a new HelperStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Write ==
    /// Counts a produced value written back to the store.
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Invalidation ==
    /// Adds the number of keys a delete actually removed.
    pub fn record_invalidated(&self, removed: u64) {
        self.invalidated.fetch_add(removed, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            invalidated: self.invalidated.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of `HelperStats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that fell through to the producer
    pub misses: u64,
    /// Produced values written back
    pub writes: u64,
    /// Keys removed by invalidation
    pub invalidated: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = HelperStats::new().snapshot();
        assert_eq!(stats, StatsSnapshot::default());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(HelperStats::new().snapshot().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = HelperStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.snapshot().hit_rate(), 0.75);
    }

    #[test]
    fn test_writes_and_invalidations() {
        let stats = HelperStats::new();
        stats.record_write();
        stats.record_invalidated(2);
        stats.record_invalidated(0);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.writes, 1);
        assert_eq!(snapshot.invalidated, 2);
    }
}
