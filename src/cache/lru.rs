//! Recency List Module
//!
//! Doubly-linked recency order backing the LRU cache.
//!
//! Nodes live in a `Vec` arena and link to each other by index, so every
//! reorder is O(1) without raw pointers. Freed slots are chained into a free
//! list and reused by later insertions.

use std::mem;

/// Null link marker.
const NIL: usize = usize::MAX;

// == Node ==
#[derive(Debug)]
struct Node<V> {
    key: String,
    /// `None` only while the slot sits on the free list
    value: Option<V>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Tracks access order for LRU eviction strategy.
///
/// - Front (head) = Least recently used
/// - Back (tail) = Most recently used
///
/// Positions handed out by [`RecencyList::push_back`] stay valid until the
/// node is removed.
#[derive(Debug)]
pub struct RecencyList<V> {
    nodes: Vec<Node<V>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends an entry at the most recently used end.
    ///
    /// Returns the node position to store in the caller's index.
    pub fn push_back(&mut self, key: String, value: V) -> usize {
        let node = Node {
            key,
            value: Some(value),
            prev: NIL,
            next: NIL,
        };

        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.nodes[idx].next;
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        };

        self.link_back(idx);
        self.len += 1;
        idx
    }

    // == Move To Back ==
    /// Marks the node at `idx` as most recently used.
    ///
    /// Positions that are out of range or already freed are ignored.
    pub fn move_to_back(&mut self, idx: usize) {
        if self.value(idx).is_none() || self.tail == idx {
            return;
        }
        self.unlink(idx);
        self.link_back(idx);
    }

    // == Remove ==
    /// Unlinks the node at `idx` and returns its entry.
    ///
    /// Returns None if the slot is not occupied.
    pub fn remove(&mut self, idx: usize) -> Option<(String, V)> {
        let value = self.nodes.get_mut(idx)?.value.take()?;
        self.unlink(idx);

        let node = &mut self.nodes[idx];
        let key = mem::take(&mut node.key);
        node.next = self.free;
        self.free = idx;
        self.len -= 1;

        Some((key, value))
    }

    // == Pop Front ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<(String, V)> {
        if self.head == NIL {
            return None;
        }
        self.remove(self.head)
    }

    // == Front ==
    /// Returns the least recently used entry without touching it.
    pub fn front(&self) -> Option<(&str, &V)> {
        self.entry(self.head)
    }

    // == Accessors ==
    /// Returns the value stored at `idx`.
    pub fn value(&self, idx: usize) -> Option<&V> {
        self.nodes.get(idx).and_then(|node| node.value.as_ref())
    }

    /// Replaces the value stored at `idx`, returning the previous one.
    ///
    /// Position in the order is left unchanged.
    pub fn replace(&mut self, idx: usize, value: V) -> Option<V> {
        let node = self.nodes.get_mut(idx)?;
        if node.value.is_none() {
            return None;
        }
        node.value.replace(value)
    }

    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> RecencyIter<'_, V> {
        RecencyIter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    // == Internal Linking ==
    fn entry(&self, idx: usize) -> Option<(&str, &V)> {
        let node = self.nodes.get(idx)?;
        node.value.as_ref().map(|value| (node.key.as_str(), value))
    }

    fn link_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = NIL;

        if self.tail != NIL {
            self.nodes[self.tail].next = idx;
        } else {
            self.head = idx;
        }
        self.tail = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }
}

// == Iterator ==
/// LRU to MRU iterator over a [`RecencyList`].
pub struct RecencyIter<'a, V> {
    list: &'a RecencyList<V>,
    current: usize,
    remaining: usize,
}

impl<'a, V> Iterator for RecencyIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let item = list.entry(self.current)?;
        self.current = list.nodes[self.current].next;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
