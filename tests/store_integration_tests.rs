//! Integration Tests for the Cache API
//!
//! Exercises the public surface end to end: the single-threaded store,
//! get-or-compute, and both thread-safe variants.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use hotcache::{CacheConfig, CacheError, LruStore, SharedLruStore, ShardedLruStore};

// == Helper Functions ==

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotcache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn store_with_items(capacity: usize, num_items: u32) -> LruStore<String, u32> {
    let mut store = LruStore::new(capacity).unwrap();
    for i in 0..num_items {
        store.insert(i.to_string(), i);
    }
    store
}

// == Basic Round Trip ==

#[test]
fn test_insert_then_get() {
    init_tracing();
    let mut store = LruStore::new(3).unwrap();

    // given an item has been inserted
    store.insert("key".to_string(), 10);

    // then the item can be retrieved
    assert_eq!(store.get(&"key".to_string()), Some(&10));
}

// == Capacity and Eviction ==

#[test]
fn test_overflow_keeps_only_newest() {
    init_tracing();

    // when twice the capacity is inserted
    let mut store = store_with_items(3, 6);

    // then only the last three remain, each with its original value
    for evicted in ["0", "1", "2"] {
        assert_eq!(store.get(&evicted.to_string()), None);
        assert!(!store.contains(&evicted.to_string()));
    }
    for (key, value) in [("3", 3), ("4", 4), ("5", 5)] {
        assert_eq!(store.get(&key.to_string()), Some(&value));
    }
}

#[test]
fn test_untouched_oldest_is_evicted() {
    init_tracing();

    // given a full store with no accesses
    let mut store = store_with_items(3, 3);

    // when a new item is inserted
    store.insert("3".to_string(), 3);

    // then the least recently used was removed and the rest remain
    assert_eq!(store.get(&"0".to_string()), None);
    for (key, value) in [("1", 1), ("2", 2), ("3", 3)] {
        assert_eq!(store.get(&key.to_string()), Some(&value));
    }
}

#[test]
fn test_reads_refresh_recency() {
    init_tracing();

    // given a full store where "0" and "2" have been read
    let mut store = store_with_items(3, 3);
    store.get(&"0".to_string());
    store.get(&"2".to_string());

    // when a new item is inserted
    store.insert("3".to_string(), 3);

    // then the one key never touched was evicted
    assert!(!store.contains(&"1".to_string()));
    for (key, value) in [("0", 0), ("2", 2), ("3", 3)] {
        assert_eq!(store.get(&key.to_string()), Some(&value));
    }
}

#[test]
fn test_capacity_one_evicts_on_every_new_key() {
    let mut store = LruStore::new(1).unwrap();

    for i in 0..4u32 {
        store.insert(i.to_string(), i);
        assert_eq!(store.len(), 1);
        assert_eq!(store.peek(&i.to_string()), Some(&i));
    }
    assert_eq!(store.stats().evictions, 3);
}

#[test]
fn test_overwrite_keeps_all_entries() {
    let mut store = LruStore::new(3).unwrap();
    store.insert("a".to_string(), 1);
    store.insert("b".to_string(), 2);
    store.insert("c".to_string(), 3);

    // when an existing key is set again
    store.insert("a".to_string(), 9);

    // then nothing was evicted and the new value is visible
    assert_eq!(store.len(), 3);
    for key in ["a", "b", "c"] {
        assert!(store.contains(&key.to_string()));
    }
    assert_eq!(store.get(&"a".to_string()), Some(&9));
}

// == Pure Queries ==

#[test]
fn test_contains_is_not_an_access() {
    let mut store = store_with_items(3, 3);

    // given "0" has been probed repeatedly without being read
    for _ in 0..5 {
        assert!(store.contains(&"0".to_string()));
    }

    // when a new item is inserted
    store.insert("3".to_string(), 3);

    // then "0" was still the eviction candidate
    assert!(!store.contains(&"0".to_string()));
}

// == Get Or Compute ==

#[test]
fn test_get_or_compute_returns_existing_value() {
    let mut store = store_with_items(2, 2);

    // when a present key is retrieved with a factory
    let value = *store.get_or_insert_with("0".to_string(), || 9);

    // then the stored value wins and the factory result is discarded
    assert_eq!(value, 0);
}

#[test]
fn test_get_or_compute_populates_missing_key() {
    let mut store: LruStore<String, u32> = LruStore::new(3).unwrap();

    // when a missing key is retrieved with a factory
    let value = *store.get_or_insert_with("key".to_string(), || 9);

    // then the computed value is returned and stored
    assert_eq!(value, 9);
    assert_eq!(store.get(&"key".to_string()), Some(&9));
}

#[test]
fn test_get_or_compute_counts_as_access() {
    // given a full store where "0" was refreshed through get-or-compute
    let mut store = store_with_items(3, 3);
    store.get_or_insert_with("0".to_string(), || 99);

    // when a new item is inserted
    store.insert("3".to_string(), 3);

    // then "1" was evicted, not the refreshed "0"
    assert!(store.contains(&"0".to_string()));
    assert!(!store.contains(&"1".to_string()));
}

#[test]
fn test_factory_not_called_for_present_key() {
    let mut store = store_with_items(2, 2);
    let calls = AtomicUsize::new(0);

    store.get_or_insert_with("1".to_string(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        9
    });

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_factory_error_leaves_store_untouched() {
    // given a full store
    let mut store = store_with_items(2, 2);

    // when the factory for a missing key fails
    let result = store.try_get_or_insert_with("oops".to_string(), || {
        Err::<u32, _>("backend unavailable")
    });

    // then the error is surfaced and nothing changed: no entry, no
    // eviction, same eviction candidate
    assert!(matches!(result, Err(CacheError::Factory(_))));
    assert!(!store.contains(&"oops".to_string()));
    assert_eq!(store.len(), 2);
    assert_eq!(store.peek_lru(), Some((&"0".to_string(), &0)));
}

#[test]
fn test_fallible_factory_success_inserts() {
    let mut store: LruStore<String, u32> = LruStore::new(2).unwrap();

    let value = *store
        .try_get_or_insert_with("key".to_string(), || Ok::<_, String>(5))
        .unwrap();

    assert_eq!(value, 5);
    assert_eq!(store.get(&"key".to_string()), Some(&5));
}

// == Construction ==

#[test]
fn test_zero_capacity_fails_fast() {
    assert!(matches!(
        LruStore::<String, u32>::new(0),
        Err(CacheError::InvalidConfiguration(_))
    ));
    assert!(SharedLruStore::<String, u32>::new(0).is_err());
    assert!(ShardedLruStore::<String, u32>::new(16, 0).is_err());
}

#[test]
fn test_construction_from_config() {
    let config = CacheConfig {
        capacity: 4,
        shards: 2,
    };

    let mut store: LruStore<String, u32> = LruStore::with_config(&config).unwrap();
    store.insert("key".to_string(), 1);
    assert_eq!(store.capacity(), 4);

    let sharded: ShardedLruStore<String, u32> = ShardedLruStore::with_config(&config).unwrap();
    assert_eq!(sharded.shard_count(), 2);
    assert_eq!(sharded.capacity(), 4);
}

// == Thread-Safe Variants ==

#[test]
fn test_shared_store_concurrent_get_or_compute() {
    init_tracing();
    let store = SharedLruStore::new(8).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let calls = Arc::clone(&calls);
        handles.push(thread::spawn(move || {
            store.get_or_insert_with("shared-key".to_string(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                42u32
            })
        }));
    }
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 42);
    }

    // the lock is held across the factory, so the miss computed exactly once
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.get(&"shared-key".to_string()), Some(42));
}

#[test]
fn test_shared_store_bounded_under_load() {
    let store = SharedLruStore::new(32).unwrap();

    let mut handles = Vec::new();
    for t in 0..4u32 {
        let store = store.clone();
        handles.push(thread::spawn(move || {
            for i in 0..250u32 {
                let key = t * 10_000 + i;
                store.insert(key, i);
                store.get(&key);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(store.len() <= 32);
}

#[test]
fn test_sharded_store_concurrent_round_trip() {
    init_tracing();
    let store = Arc::new(ShardedLruStore::new(1024, 8).unwrap());

    let mut handles = Vec::new();
    for t in 0..4u32 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..100u32 {
                let key = format!("t{t}-{i}");
                store.insert(key.clone(), i);
                assert_eq!(store.get(&key), Some(i));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(store.len() <= store.capacity());
    assert!(store.stats().hits >= 400);
}
