//! Cache Store Module
//!
//! Main cache engine combining a hashed key index with the recency list for
//! O(1) lookup, insertion, and LRU eviction.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::debug;

use crate::cache::entry::Entry;
use crate::cache::lru::RecencyList;
use crate::cache::stats::CacheStats;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Fixed-capacity key-value store with least-recently-used eviction.
///
/// Lookups go through `index`, which maps each key to the slot of its entry
/// in `list`; `list` keeps those entries in recency order. Promotion and
/// eviction each relink a single node, so every operation is O(1) amortized
/// regardless of capacity or current load.
///
/// All methods take `&self`/`&mut self` and never block: the store has no
/// notion of concurrent callers. Use [`SharedLruStore`](crate::SharedLruStore)
/// or [`ShardedLruStore`](crate::ShardedLruStore) from multiple threads.
#[derive(Debug)]
pub struct LruStore<K, V> {
    /// Key -> slot of the entry in `list`
    index: HashMap<K, usize, RandomState>,
    /// Entries in recency order (front = most recent)
    list: RecencyList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` when `capacity` is zero; a
    /// cache that can hold nothing would silently evict every value it is
    /// given.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Creates a store from a validated configuration.
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    // == Get ==
    /// Retrieves a value by key, marking it as most recently used.
    ///
    /// Absence is a normal outcome: `None` carries no error and leaves the
    /// recency order untouched.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&idx) => {
                self.stats.record_hit();
                self.list.touch(idx);
                self.list.get(idx).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Get Or Insert ==
    /// Retrieves the value for `key`, computing and inserting it on a miss.
    ///
    /// On a hit the factory is not invoked and the existing value is
    /// promoted and returned. On a miss the factory runs exactly once, the
    /// result is inserted (evicting the least recently used entry if the
    /// store is full), and the new value is returned. Either way `key` ends
    /// up as the most recently used entry.
    pub fn get_or_insert_with<F>(&mut self, key: K, factory: F) -> &V
    where
        F: FnOnce() -> V,
    {
        let idx = match self.index.get(&key) {
            Some(&idx) => {
                self.stats.record_hit();
                self.list.touch(idx);
                idx
            }
            None => {
                self.stats.record_miss();
                let value = factory();
                self.insert_new(key, value)
            }
        };
        self.value_at(idx)
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// A factory error is returned as `CacheError::Factory` wrapping the
    /// caller's error unchanged. The factory runs before any mutation, so a
    /// failure leaves the store exactly as it was: no insertion, no
    /// eviction, no recency change. The factory is never retried.
    pub fn try_get_or_insert_with<F, E>(&mut self, key: K, factory: F) -> Result<&V>
    where
        F: FnOnce() -> std::result::Result<V, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let idx = match self.index.get(&key) {
            Some(&idx) => {
                self.stats.record_hit();
                self.list.touch(idx);
                idx
            }
            None => {
                self.stats.record_miss();
                let value = factory().map_err(CacheError::factory)?;
                self.insert_new(key, value)
            }
        };
        Ok(self.value_at(idx))
    }

    // == Insert ==
    /// Stores a key-value pair, returning the value it replaced, if any.
    ///
    /// Overwriting a present key replaces the value in place and promotes
    /// the key without growing the entry count or evicting anything.
    /// Inserting a new key into a full store evicts the least recently used
    /// entry first.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&idx) => {
                let replaced = self
                    .list
                    .get_mut(idx)
                    .map(|entry| std::mem::replace(&mut entry.value, value));
                self.list.touch(idx);
                replaced
            }
            None => {
                self.insert_new(key, value);
                None
            }
        }
    }

    // == Contains ==
    /// Reports whether an entry exists for `key`.
    ///
    /// Pure query: recency order and statistics are unaffected.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Peek ==
    /// Reads a value without marking it as used.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index
            .get(key)
            .and_then(|&idx| self.list.get(idx))
            .map(|entry| &entry.value)
    }

    /// Returns the current eviction candidate without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    // == Remove ==
    /// Removes an entry by key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index.remove(key)?;
        let entry = self.list.remove(idx);
        self.stats.set_total_entries(self.index.len());
        entry.map(|entry| entry.value)
    }

    // == Clear ==
    /// Drops every entry and resets statistics.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
        self.stats.reset();
        debug!("cache cleared");
    }

    // == Introspection ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Internal ==
    /// Inserts a key known to be absent, evicting first when full.
    fn insert_new(&mut self, key: K, value: V) -> usize {
        if self.index.len() >= self.capacity {
            self.evict_lru();
        }
        let idx = self.list.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, idx);
        self.stats.set_total_entries(self.index.len());
        idx
    }

    /// Removes the least recently used entry to make room.
    fn evict_lru(&mut self) {
        if let Some(entry) = self.list.pop_back() {
            self.index.remove(&entry.key);
            self.stats.record_eviction();
            debug!(
                len = self.index.len(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }
    }

    /// Reads the value in a slot the index vouches for.
    fn value_at(&self, idx: usize) -> &V {
        self.list
            .get(idx)
            .map(|entry| &entry.value)
            .expect("index and recency list agree on live slots")
    }

    /// Asserts the structural invariants: entry count within capacity and
    /// the index and recency list forming a bijection over present keys.
    #[cfg(test)]
    pub(crate) fn check_consistency(&self) {
        assert!(
            self.index.len() <= self.capacity,
            "entry count {} exceeds capacity {}",
            self.index.len(),
            self.capacity
        );
        let order: Vec<usize> = self.list.iter_front_to_back().collect();
        assert_eq!(
            order.len(),
            self.index.len(),
            "index and list disagree on entry count"
        );
        for idx in order {
            let entry = self.list.get(idx).expect("walked slot must be occupied");
            assert_eq!(
                self.index.get(&entry.key),
                Some(&idx),
                "index does not point at the entry's slot"
            );
        }
    }

    /// Key currently at the most-recently-used end.
    #[cfg(test)]
    pub(crate) fn mru_key(&self) -> Option<&K> {
        self.list.front().map(|entry| &entry.key)
    }
}
