//! Shared Cache Module
//!
//! Thread-safe handle around a single `BoundedLruCache`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::cache::{BoundedLruCache, CacheStats};
use crate::error::CacheError;

// == Shared Cache ==
/// Cloneable handle serializing every cache operation behind one mutex.
///
/// `get` reorders entries, so reads take the same exclusive lock as writes.
/// The lock is held only for the O(1) operation itself and never across an
/// await point. Values are cloned out so no guard escapes.
pub struct SharedCache<V> {
    inner: Arc<Mutex<BoundedLruCache<V>>>,
    capacity: usize,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}

impl<V> fmt::Debug for SharedCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCache")
            .field("capacity", &self.capacity)
            .field("size", &self.size())
            .finish()
    }
}

impl<V> SharedCache<V> {
    // == Constructor ==
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        BoundedLruCache::new(capacity).map(Self::from_cache)
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: BoundedLruCache<V>) -> Self {
        let capacity = cache.capacity();
        Self {
            inner: Arc::new(Mutex::new(cache)),
            capacity,
        }
    }

    // == Lock ==
    fn lock(&self) -> MutexGuard<'_, BoundedLruCache<V>> {
        // Cache operations keep index and order in step without panicking
        // in between, so the state behind a poisoned lock is still sound.
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    // == Put ==
    /// Inserts or overwrites an entry, returning any evicted one.
    pub fn put(&self, key: impl Into<String>, value: V) -> Option<(String, V)> {
        let evicted = self.lock().put(key, value);
        if let Some((evicted_key, _)) = &evicted {
            debug!("Evicted least recently used entry: {}", evicted_key);
        }
        evicted
    }

    // == Delete ==
    /// Removes an entry, returning its value if it was resident.
    pub fn delete(&self, key: &str) -> Option<V> {
        self.lock().delete(key)
    }

    // == Size ==
    pub fn size(&self) -> usize {
        self.lock().size()
    }

    /// Returns the fixed capacity without taking the lock.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when inserting a new key would evict an entry.
    pub fn will_evict_on_next_insert(&self) -> bool {
        self.lock().will_evict_on_next_insert()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.lock().is_consistent()
    }
}

impl<V: Clone> SharedCache<V> {
    // == Get ==
    /// Returns a copy of the value and marks the key most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key).cloned()
    }

    // == List All ==
    /// Returns a point-in-time copy of every entry.
    pub fn list_all(&self) -> HashMap<String, V> {
        self.lock().list_all()
    }
}
