//! Recency List Module
//!
//! Slab-backed intrusive doubly-linked list maintaining entries in recency
//! order for O(1) promotion and eviction.
//!
//! Nodes live in a slab and reference each other by slot index, so moving an
//! entry to the front or unlinking the back never shifts other entries:
//! - Front = Most recently used
//! - Back = Least recently used

use crate::cache::entry::Entry;

// == Recency List ==
/// Owns the entry nodes and threads a doubly-linked list through them.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    /// Node arena; vacated slots are `None` and tracked in `free`
    nodes: Vec<Option<Entry<K, V>>>,
    /// Slot of the most recently used entry
    head: Option<usize>,
    /// Slot of the least recently used entry
    tail: Option<usize>,
    /// Reusable slots left behind by removals
    free: Vec<usize>,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free: Vec::new(),
        }
    }

    // == Push Front ==
    /// Links an entry in at the most-recently-used end, returning its slot.
    pub(crate) fn push_front(&mut self, mut entry: Entry<K, V>) -> usize {
        entry.prev = None;
        entry.next = self.head;
        let idx = self.alloc(entry);

        if let Some(old_head) = self.head {
            if let Some(node) = &mut self.nodes[old_head] {
                node.prev = Some(idx);
            }
        }
        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        idx
    }

    // == Touch ==
    /// Moves the entry in `idx` to the most-recently-used end.
    pub(crate) fn touch(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }
        if let Some(old_head) = self.head {
            if let Some(node) = &mut self.nodes[old_head] {
                node.prev = Some(idx);
            }
        }
        self.head = Some(idx);
    }

    // == Remove ==
    /// Unlinks and returns the entry in `idx`, recycling its slot.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<Entry<K, V>> {
        // Unlink first: it reads the links still stored in the slot.
        self.unlink(idx);
        let entry = self.nodes.get_mut(idx).and_then(|slot| slot.take());
        if entry.is_some() {
            self.free.push(idx);
        }
        entry
    }

    // == Pop Back ==
    /// Unlinks and returns the least-recently-used entry.
    pub(crate) fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let idx = self.tail?;
        self.remove(idx)
    }

    // == Accessors ==
    /// Returns the entry in `idx` if the slot is occupied.
    pub(crate) fn get(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.nodes.get(idx).and_then(|slot| slot.as_ref())
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(idx).and_then(|slot| slot.as_mut())
    }

    /// Most recently used entry without unlinking it.
    #[allow(dead_code)]
    pub(crate) fn front(&self) -> Option<&Entry<K, V>> {
        self.head.and_then(|idx| self.get(idx))
    }

    /// Least recently used entry without unlinking it.
    pub(crate) fn back(&self) -> Option<&Entry<K, V>> {
        self.tail.and_then(|idx| self.get(idx))
    }

    // == Clear ==
    /// Drops every node and resets the list to empty.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Walks occupied slots from most to least recently used.
    #[cfg(test)]
    pub(crate) fn iter_front_to_back(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.head, move |&idx| {
            self.get(idx).and_then(|entry| entry.next)
        })
    }

    // == Internal Linking ==
    /// Detaches `idx` from its neighbors, fixing head/tail as needed.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes.get(idx).and_then(|slot| slot.as_ref()) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(node) = &mut self.nodes[prev_idx] {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next_idx) => {
                if let Some(node) = &mut self.nodes[next_idx] {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Stores the entry in a vacated slot if one exists, otherwise appends.
    fn alloc(&mut self, entry: Entry<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(entry);
                idx
            }
            None => {
                self.nodes.push(Some(entry));
                self.nodes.len() - 1
            }
        }
    }
}
