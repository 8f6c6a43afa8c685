//! Shared Store Module
//!
//! Cloneable, thread-safe handle around a single [`LruStore`].

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::stats::CacheStats;
use crate::cache::store::LruStore;
use crate::config::CacheConfig;
use crate::error::Result;

// == Shared Store ==
/// Thread-safe handle to one store, cheap to clone across threads.
///
/// A single mutex guards the whole structure for the duration of each
/// operation: even lookups reorder entries, so every operation is a write
/// at the structure level. Lookups return owned clones so no borrow escapes
/// the lock, which is why `V: Clone` is required here but not on the core
/// store.
pub struct SharedLruStore<K, V> {
    inner: Arc<Mutex<LruStore<K, V>>>,
}

impl<K, V> Clone for SharedLruStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLruStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a store holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(LruStore::new(capacity)?)),
        })
    }

    /// Creates a store from a validated configuration.
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(LruStore::with_config(config)?)),
        })
    }

    // == Operations ==
    /// Retrieves a clone of the value, marking the key as most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Retrieves the value for `key`, computing and inserting it on a miss.
    ///
    /// The factory runs while the store lock is held: a missing key is
    /// computed at most once no matter how many threads race on it, at the
    /// cost of stalling unrelated operations behind a slow factory.
    pub fn get_or_insert_with<F>(&self, key: K, factory: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.inner.lock().get_or_insert_with(key, factory).clone()
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// Same locking discipline; a factory error leaves the store unmodified.
    pub fn try_get_or_insert_with<F, E>(&self, key: K, factory: F) -> Result<V>
    where
        F: FnOnce() -> std::result::Result<V, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.inner
            .lock()
            .try_get_or_insert_with(key, factory)
            .map(|value| value.clone())
    }

    /// Stores a key-value pair, returning the value it replaced, if any.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Reports whether an entry exists for `key` without touching recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Reads a clone of the value without marking it as used.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// Removes an entry by key, returning its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Drops every entry and resets statistics.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == Introspection ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}
