//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

// == Cache Stats ==
/// Snapshot of cache performance counters.
///
/// Only promoting lookups (`get` and the get-or-compute path) count as hits
/// or misses; pure queries such as `contains` and `peek` are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of promoting lookups that found an entry
    pub hits: u64,
    /// Number of promoting lookups that found nothing
    pub misses: u64,
    /// Number of entries evicted under capacity pressure
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

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

    // == Recording ==
    /// Increments the hit counter.
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the eviction counter.
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Updates the total entries count.
    pub(crate) fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    /// Resets every counter to zero.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    // == Merge ==
    /// Adds another snapshot's counters into this one.
    ///
    /// Used to aggregate per-shard statistics into a single view.
    pub fn merge(&mut self, other: &CacheStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.evictions += other.evictions;
        self.total_entries += other.total_entries;
    }
}
