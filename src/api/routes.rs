//! API Routes
//!
//! Configures the Axum router with all status registry endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::require_api_key;
use super::handlers::{
    delete_status_handler, get_status_handler, health_handler, list_statuses_handler,
    ping_handler, report_status_handler, root_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - API key: guards the status and delete routes when a key is configured
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let guarded = Router::new()
        .route(
            "/api/v1/service/status",
            get(get_status_handler).post(report_status_handler),
        )
        .route("/api/v1/service/status/all", get(list_statuses_handler))
        .route("/api/v1/delete", delete(delete_status_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/ping", get(ping_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/stats", get(stats_handler))
        .merge(guarded)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
