//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple reference model.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Barrier;
use std::thread;

use crate::cache::{BoundedLruCache, SharedCache};

// == Reference Model ==
/// Vec-backed LRU with O(n) operations, oldest entry first.
#[derive(Debug)]
struct ModelLru {
    entries: Vec<(String, u32)>,
    capacity: usize,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn get(&mut self, key: &str) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        let value = entry.1;
        self.entries.push(entry);
        Some(value)
    }

    fn put(&mut self, key: &str, value: u32) -> Option<(String, u32)> {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
            self.entries.push((key.to_string(), value));
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            Some(self.entries.remove(0))
        } else {
            None
        };
        self.entries.push((key.to_string(), value));
        evicted
    }

    fn delete(&mut self, key: &str) -> Option<u32> {
        let pos = self.position(key)?;
        Some(self.entries.remove(pos).1)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f]{0,2}"
}

/// Service-URL shaped keys for the distinct-key properties
fn url_strategy() -> impl Strategy<Value = String> {
    "https://[a-z]{1,12}\\.example\\.com/[a-z0-9]{0,8}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
    ListAll,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::ListAll),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation result and the resulting recency order match the model,
    // and size never exceeds capacity.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut cache = BoundedLruCache::new(capacity).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    prop_assert_eq!(cache.put(key.as_str(), value), model.put(&key, value));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(&key));
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(cache.delete(&key), model.delete(&key));
                }
                CacheOp::ListAll => {
                    let expected: HashMap<String, u32> = model.entries.iter().cloned().collect();
                    prop_assert_eq!(cache.list_all(), expected);
                }
            }

            prop_assert!(cache.size() <= capacity);
            prop_assert!(cache.is_consistent());
            prop_assert_eq!(cache.keys_lru_to_mru(), model.keys());
        }
    }

    // Inserting C+1 distinct keys without reads evicts exactly the first one.
    #[test]
    fn prop_overflow_evicts_first_inserted(
        keys in prop::collection::hash_set(url_strategy(), 2..40)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len() - 1;
        let mut cache = BoundedLruCache::new(capacity).unwrap();

        let mut evictions = Vec::new();
        for key in &keys {
            if let Some((evicted, _)) = cache.put(key.clone(), key.len()) {
                evictions.push(evicted);
            }
        }

        prop_assert_eq!(evictions, vec![keys[0].clone()]);
        prop_assert_eq!(cache.size(), capacity);
        for key in keys.iter().skip(1) {
            prop_assert!(cache.contains_key(key), "Key '{}' should still be resident", key);
        }
    }

    // A read moves the key off the LRU end, so the next-oldest key goes instead.
    #[test]
    fn prop_read_refreshes_recency(
        keys in prop::collection::hash_set(url_strategy(), 3..20),
        new_key in url_strategy()
    ) {
        prop_assume!(!keys.contains(&new_key));
        let keys: Vec<String> = keys.into_iter().collect();
        let mut cache = BoundedLruCache::new(keys.len()).unwrap();

        for key in &keys {
            cache.put(key.clone(), ());
        }
        prop_assert!(cache.get(&keys[0]).is_some());

        let evicted = cache.put(new_key.clone(), ()).map(|(k, _)| k);

        prop_assert_eq!(evicted, Some(keys[1].clone()));
        prop_assert!(cache.contains_key(&keys[0]));
        prop_assert!(cache.contains_key(&new_key));
    }

    // Snapshots never change after the cache is mutated.
    #[test]
    fn prop_list_all_snapshot_isolated(
        initial in prop::collection::vec((key_strategy(), any::<u32>()), 1..20),
        ops in prop::collection::vec(cache_op_strategy(), 1..40)
    ) {
        let mut cache = BoundedLruCache::new(8).unwrap();
        for (key, value) in initial {
            cache.put(key, value);
        }

        let snapshot = cache.list_all();
        let frozen = snapshot.clone();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => { cache.put(key, value); }
                CacheOp::Get { key } => { cache.get(&key); }
                CacheOp::Delete { key } => { cache.delete(&key); }
                CacheOp::ListAll => { cache.list_all(); }
            }
        }

        prop_assert_eq!(snapshot, frozen);
    }

    // Overwrites never change occupancy.
    #[test]
    fn prop_overwrite_keeps_size(
        key in url_strategy(),
        values in prop::collection::vec(any::<u32>(), 1..20)
    ) {
        let mut cache = BoundedLruCache::new(1).unwrap();
        let last = values[values.len() - 1];

        for value in values {
            prop_assert!(cache.put(key.clone(), value).is_none());
            prop_assert_eq!(cache.size(), 1);
        }

        prop_assert_eq!(cache.get(&key), Some(&last));
    }
}

// == Concurrent Access ==
/// Worker threads released together by a barrier
const CONCURRENT_WORKERS: usize = 4;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Worker threads racing over one shared cache leave it consistent and
    // within capacity; every value read is one that some worker wrote.
    #[test]
    fn prop_concurrent_operation_correctness(
        capacity in 1usize..10,
        ops in prop::collection::vec(cache_op_strategy(), 10..80)
    ) {
        let written: HashSet<u32> = ops
            .iter()
            .filter_map(|op| match op {
                CacheOp::Put { value, .. } => Some(*value),
                _ => None,
            })
            .collect();

        let cache: SharedCache<u32> = SharedCache::new(capacity).unwrap();
        let barrier = Barrier::new(CONCURRENT_WORKERS);
        let chunk_len = ops.len().div_ceil(CONCURRENT_WORKERS);

        let results: Vec<Result<(), String>> = thread::scope(|scope| {
            let handles: Vec<_> = ops
                .chunks(chunk_len)
                .chain(std::iter::repeat(&[][..]))
                .take(CONCURRENT_WORKERS)
                .map(|chunk| {
                    let cache = cache.clone();
                    let barrier = &barrier;
                    let written = &written;
                    scope.spawn(move || {
                        barrier.wait();
                        for op in chunk {
                            match op {
                                CacheOp::Put { key, value } => {
                                    cache.put(key.as_str(), *value);
                                }
                                CacheOp::Get { key } => {
                                    if let Some(value) = cache.get(key) {
                                        if !written.contains(&value) {
                                            return Err(format!("Read unknown value {} for '{}'", value, key));
                                        }
                                    }
                                }
                                CacheOp::Delete { key } => {
                                    cache.delete(key);
                                }
                                CacheOp::ListAll => {
                                    if cache.list_all().len() > capacity {
                                        return Err("Snapshot exceeds capacity".to_string());
                                    }
                                }
                            }
                            if cache.size() > capacity {
                                return Err("Size exceeds capacity".to_string());
                            }
                        }
                        Ok(())
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| "Worker panicked".to_string()).and_then(|r| r))
                .collect()
        });

        for result in results {
            prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
        }
        prop_assert!(cache.size() <= capacity);
        prop_assert!(cache.is_consistent());
        prop_assert_eq!(cache.list_all().len(), cache.size());
    }
}
