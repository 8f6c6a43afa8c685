//! Sharded Store Module
//!
//! Hash-sharded store trading strict global LRU order for reduced lock
//! contention.

use std::hash::Hash;

use ahash::RandomState;
use parking_lot::Mutex;
use tracing::debug;

use crate::cache::stats::CacheStats;
use crate::cache::store::LruStore;
use crate::config::CacheConfig;
use crate::error::Result;

// == Sharded Store ==
/// A set of independently locked stores indexed by key hash.
///
/// Each key always routes to the same shard, so per-key guarantees carry
/// over unchanged: overwrite semantics, recency promotion, and the
/// at-most-once factory call on a miss. What is relaxed is eviction order,
/// which is per shard: the globally least recently used entry survives as
/// long as its own shard is under capacity.
///
/// The struct is `Sync`; wrap it in an `Arc` to share across threads.
pub struct ShardedLruStore<K, V> {
    shards: Vec<Mutex<LruStore<K, V>>>,
    hasher: RandomState,
}

impl<K, V> ShardedLruStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a store with `capacity` total entries spread over `shards`
    /// independently locked sub-stores.
    ///
    /// Capacity divides with ceiling so every shard can hold at least one
    /// entry; the effective total is rounded up to a multiple of the shard
    /// count (see [`capacity`](Self::capacity)).
    pub fn new(capacity: usize, shards: usize) -> Result<Self> {
        Self::with_config(&CacheConfig { capacity, shards })
    }

    /// Creates a store from a validated configuration.
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;

        let per_shard = config.capacity.div_ceil(config.shards);
        let mut shards = Vec::with_capacity(config.shards);
        for _ in 0..config.shards {
            shards.push(Mutex::new(LruStore::new(per_shard)?));
        }
        debug!(
            shards = config.shards,
            per_shard_capacity = per_shard,
            "created sharded store"
        );

        Ok(Self {
            shards,
            hasher: RandomState::new(),
        })
    }

    // == Operations ==
    /// Retrieves a clone of the value, marking the key as most recently
    /// used within its shard.
    pub fn get(&self, key: &K) -> Option<V> {
        self.shard(key).lock().get(key).cloned()
    }

    /// Retrieves the value for `key`, computing and inserting it on a miss.
    ///
    /// Only the owning shard is locked while the factory runs, so a slow
    /// factory stalls one shard rather than the whole cache.
    pub fn get_or_insert_with<F>(&self, key: K, factory: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.shard(&key).lock().get_or_insert_with(key, factory).clone()
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    pub fn try_get_or_insert_with<F, E>(&self, key: K, factory: F) -> Result<V>
    where
        F: FnOnce() -> std::result::Result<V, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.shard(&key)
            .lock()
            .try_get_or_insert_with(key, factory)
            .map(|value| value.clone())
    }

    /// Stores a key-value pair, returning the value it replaced, if any.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.shard(&key).lock().insert(key, value)
    }

    /// Reports whether an entry exists for `key` without touching recency.
    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().contains(key)
    }

    /// Reads a clone of the value without marking it as used.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.shard(key).lock().peek(key).cloned()
    }

    /// Removes an entry by key, returning its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Drops every entry and resets statistics in all shards.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.lock().clear();
        }
    }

    // == Introspection ==
    /// Total number of entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Returns true when every shard is empty.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Effective total capacity (per-shard capacity times shard count).
    pub fn capacity(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().capacity())
            .sum()
    }

    /// Number of independently locked sub-stores.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Aggregated statistics across all shards.
    pub fn stats(&self) -> CacheStats {
        let mut total = CacheStats::new();
        for shard in &self.shards {
            total.merge(&shard.lock().stats());
        }
        total
    }

    // == Internal ==
    /// Routes a key to its shard by hash.
    fn shard(&self, key: &K) -> &Mutex<LruStore<K, V>> {
        let hash = self.hasher.hash_one(key) as usize;
        &self.shards[hash % self.shards.len()]
    }
}
