//! Status Registry - Service status tracking over HTTP
//!
//! Keeps the latest reported status per service URL in a bounded cache
//! with least recently used eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{BoundedLruCache, SharedCache};
pub use config::Config;
