//! Cache Statistics Module
//!
//! Read-only snapshot of cache state, computed at call time.

use serde::Serialize;

// == Age Distribution ==
/// Histogram of entry ages at snapshot time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgeDistribution {
    /// Entries fetched less than 30 seconds ago
    pub recent: usize,
    /// Entries fetched between 30 and 120 seconds ago
    pub medium: usize,
    /// Entries fetched more than 120 seconds ago
    pub old: usize,
}

// == Cache Stats ==
/// Snapshot of cache contents and lookup counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of entries currently stored
    pub total_entries: usize,
    /// Number of fetches currently in flight
    pub total_pending: usize,
    /// Keys of all stored entries
    pub cache_keys: Vec<String>,
    /// Entry ages bucketed at snapshot time
    pub age_distribution: AgeDistribution,
    /// Number of fresh-lookup hits since construction
    pub hits: u64,
    /// Number of fresh-lookup misses since construction
    pub misses: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
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
