//! Cache Store Module
//!
//! Bounded cache engine pairing a HashMap index with the recency list.

use std::collections::HashMap;
use std::fmt;

use crate::cache::{CacheStats, RecencyList};
use crate::error::CacheError;

/// Upper bound on slots reserved up front; larger caches grow on demand
const PREALLOCATE_LIMIT: usize = 1024;

// == Bounded LRU Cache ==
/// Fixed-capacity key-value store with least recently used eviction.
///
/// `index` maps each resident key to its node in `order`; both always hold
/// the same key set and never more than `capacity` entries. Every operation
/// is O(1) amortized.
pub struct BoundedLruCache<V> {
    /// Key to recency list position
    index: HashMap<String, usize>,
    /// Entries ordered from least to most recently used
    order: RecencyList<V>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<V> fmt::Debug for BoundedLruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedLruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<V> BoundedLruCache<V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "cache capacity must be a positive integer".to_string(),
            ));
        }

        let reserved = capacity.min(PREALLOCATE_LIMIT);
        Ok(Self {
            index: HashMap::with_capacity(reserved),
            order: RecencyList::with_capacity(reserved),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss leaves the recency order untouched.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        match self.index.get(key) {
            Some(&idx) => {
                self.order.move_to_back(idx);
                self.stats.record_hit();
                self.order.value(idx)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Inserts or overwrites `key`, making it most recently used.
    ///
    /// Overwriting never evicts. Inserting a new key into a full cache first
    /// evicts the least recently used entry, which is returned.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<(String, V)> {
        let key = key.into();

        if let Some(&idx) = self.index.get(&key) {
            self.order.replace(idx, value);
            self.order.move_to_back(idx);
            self.stats.record_update();
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let idx = self.order.push_back(key.clone(), value);
        self.index.insert(key, idx);
        self.stats.record_insertion();

        evicted
    }

    // == Delete ==
    /// Removes `key` and returns its value, or None if it was not resident.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        let (_, value) = self.order.remove(idx)?;
        self.stats.record_removal();
        Some(value)
    }

    // == Size ==
    /// Returns the current number of entries in the cache.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when inserting a new key would evict an entry.
    pub fn will_evict_on_next_insert(&self) -> bool {
        self.index.len() >= self.capacity
    }

    /// Checks residency without counting as a use.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the next eviction candidate without touching it.
    pub fn peek_lru(&self) -> Option<(&str, &V)> {
        self.order.front()
    }

    // == Stats ==
    /// Returns a snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.index.len();
        stats.capacity = self.capacity;
        stats
    }

    fn evict_lru(&mut self) -> Option<(String, V)> {
        let (key, value) = self.order.pop_front()?;
        self.index.remove(&key);
        self.stats.record_eviction();
        Some((key, value))
    }

    /// Verifies that index and recency order describe the same entries.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.index.len() == self.order.len()
            && self.index.len() <= self.capacity
            && self
                .order
                .iter()
                .all(|(key, _)| self.index.contains_key(key))
            && self
                .index
                .values()
                .all(|&idx| self.order.value(idx).is_some())
    }

    /// Resident keys from least to most recently used.
    #[cfg(test)]
    pub(crate) fn keys_lru_to_mru(&self) -> Vec<String> {
        self.order.iter().map(|(key, _)| key.to_string()).collect()
    }
}

impl<V: Clone> BoundedLruCache<V> {
    // == List All ==
    /// Returns a point-in-time copy of every entry.
    ///
    /// The copy carries no recency information and listing is not a use.
    pub fn list_all(&self) -> HashMap<String, V> {
        self.order
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }
}
