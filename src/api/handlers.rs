//! API Handlers
//!
//! HTTP request handlers for each status registry endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{ApiError, CacheError, Result};
use crate::models::{
    DeleteQuery, HealthResponse, PingResponse, RootResponse, ServiceStatus, StatsResponse,
    StatusQuery, StatusUpdatedResponse,
};

/// Application state shared across all handlers.
///
/// Holds the one status cache created at startup. Cloning shares it.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Service URL to latest reported status
    pub statuses: SharedCache<ServiceStatus>,
    /// Key required by the guarded routes, if any
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    /// Creates a new AppState around the given cache, with no API key.
    pub fn new(statuses: SharedCache<ServiceStatus>) -> Self {
        Self {
            statuses,
            api_key: None,
        }
    }

    /// Requires `key` on the guarded routes.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(Arc::from(key.into()));
        self
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured capacity is not usable.
    pub fn from_config(config: &Config) -> std::result::Result<Self, CacheError> {
        let state = Self::new(SharedCache::new(config.max_cache_size)?);
        Ok(match &config.api_key {
            Some(key) => state.with_api_key(key.clone()),
            None => state,
        })
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::welcome())
}

/// Handler for GET /ping
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

/// Handler for POST /api/v1/service/status
///
/// Records the latest status for a service URL. May evict the least
/// recently used URL when the cache is full.
pub async fn report_status_handler(
    State(state): State<AppState>,
    Json(payload): Json<ServiceStatus>,
) -> Result<Json<StatusUpdatedResponse>> {
    if let Some(error_msg) = payload.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    state.statuses.put(payload.url.clone(), payload.clone());
    debug!("Status for {} set to {}", payload.url, payload.status);

    Ok(Json(StatusUpdatedResponse::new(payload)))
}

/// Handler for GET /api/v1/service/status/all
pub async fn list_statuses_handler(
    State(state): State<AppState>,
) -> Json<HashMap<String, ServiceStatus>> {
    Json(state.statuses.list_all())
}

/// Handler for GET /api/v1/service/status?service_url=...
pub async fn get_status_handler(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<ServiceStatus>> {
    state
        .statuses
        .get(&query.service_url)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Service: {} not found.", query.service_url)))
}

/// Handler for DELETE /api/v1/delete?key=...
///
/// Returns the removed record.
pub async fn delete_status_handler(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ServiceStatus>> {
    state
        .statuses
        .delete(&query.key)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Item: {} not found.", query.key)))
}

/// Handler for GET /api/v1/health
///
/// Reports cache occupancy alongside the service status.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.statuses.size(),
        state.statuses.capacity(),
    ))
}

/// Handler for GET /api/v1/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.statuses.stats()))
}
