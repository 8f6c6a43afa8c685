//! Hotcache - a fixed-capacity in-memory LRU cache
//!
//! Provides O(1) lookup, insertion, and eviction with a get-or-compute
//! access pattern, plus lock-guarded and hash-sharded variants for
//! multi-threaded use.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, LruStore, SharedLruStore, ShardedLruStore};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
