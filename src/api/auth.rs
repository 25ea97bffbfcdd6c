//! API Key Guard
//!
//! Middleware rejecting requests without the configured API key.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::handlers::AppState;
use crate::error::{ApiError, Result};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Passes the request through when no key is configured or the
/// `x-api-key` header matches it; otherwise responds 401.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(expected) = state.api_key.as_deref() {
        let provided = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected) {
            warn!("Rejected {} {}: invalid API key", request.method(), request.uri().path());
            return Err(ApiError::Unauthorized("invalid API key".to_string()));
        }
    }

    Ok(next.run(request).await)
}
