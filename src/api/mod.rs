//! API Module
//!
//! HTTP handlers and routing for the status registry REST API.
//!
//! # Endpoints
//! - `GET /` - Welcome message
//! - `GET /ping` - Liveness check
//! - `POST /api/v1/service/status` - Report a service status
//! - `GET /api/v1/service/status?service_url=` - Fetch one status
//! - `GET /api/v1/service/status/all` - List all statuses
//! - `DELETE /api/v1/delete?key=` - Remove a status
//! - `GET /api/v1/health` - Cache occupancy and health
//! - `GET /api/v1/stats` - Cache statistics

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{require_api_key, API_KEY_HEADER};
pub use handlers::*;
pub use routes::create_router;
