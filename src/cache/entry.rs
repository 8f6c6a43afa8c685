//! Cache Entry Module
//!
//! Defines the node stored for each cached key: the key-value pair plus the
//! intrusive links that thread it into the recency list.

// == Cache Entry ==
/// A single key-value association and its position in recency order.
///
/// `prev`/`next` are slot indices into the owning list's node arena, with
/// `None` marking the ends of the list. The key is duplicated here so the
/// least recently used entry can be unmapped without a reverse lookup.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    /// The cached key; a copy also lives in the store's index map
    pub(crate) key: K,
    /// The cached value
    pub(crate) value: V,
    /// Slot of the next-more-recently-used entry
    pub(crate) prev: Option<usize>,
    /// Slot of the next-less-recently-used entry
    pub(crate) next: Option<usize>,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry that is not yet linked into any list.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }
}
