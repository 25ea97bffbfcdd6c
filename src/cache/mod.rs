//! Cache Module
//!
//! Bounded in-memory cache with least recently used eviction.

mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub(crate) use lru::RecencyList;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::BoundedLruCache;

// == Public Constants ==
/// Capacity used when `MAX_CACHE_SIZE` is not set
pub const DEFAULT_CAPACITY: usize = 10_000;
