//! Response DTOs for the status registry API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::ServiceStatus;

/// Response body for GET /
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
}

impl RootResponse {
    pub fn welcome() -> Self {
        Self {
            message: "Welcome to the status registry, see /api/v1/health for cache health"
                .to_string(),
        }
    }
}

/// Response body for GET /ping
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub response: String,
}

impl PingResponse {
    pub fn pong() -> Self {
        Self {
            response: "pong".to_string(),
        }
    }
}

/// Response body for POST /api/v1/service/status
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdatedResponse {
    /// Success message
    pub message: String,
    /// The stored record
    pub payload: ServiceStatus,
}

impl StatusUpdatedResponse {
    /// Creates a new StatusUpdatedResponse
    pub fn new(payload: ServiceStatus) -> Self {
        Self {
            message: format!("Status for {} updated successfully.", payload.url),
            payload,
        }
    }
}

/// Response body for the health endpoint (GET /api/v1/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Number of tracked services
    pub cache_size: usize,
    /// Cache capacity
    pub max_cache_size: usize,
    /// cache_size / max_cache_size * 100
    pub memory_usage_percent: f64,
    /// Whether reporting a new service URL would evict another
    pub will_evict_on_next_add: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a healthy HealthResponse for the given occupancy
    pub fn healthy(cache_size: usize, max_cache_size: usize) -> Self {
        let memory_usage_percent = if max_cache_size > 0 {
            cache_size as f64 / max_cache_size as f64 * 100.0
        } else {
            0.0
        };
        Self {
            status: "healthy".to_string(),
            cache_size,
            max_cache_size,
            memory_usage_percent,
            will_evict_on_next_add: cache_size >= max_cache_size,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /api/v1/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub updates: u64,
    pub evictions: u64,
    pub removals: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            insertions: stats.insertions,
            updates: stats.updates,
            evictions: stats.evictions,
            removals: stats.removals,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
