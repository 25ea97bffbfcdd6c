//! Request DTOs for the status registry API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::{Deserialize, Serialize};

/// Maximum accepted service URL length in bytes
pub const MAX_URL_LENGTH: usize = 2048;

/// Status record reported for one service (POST /api/v1/service/status)
///
/// Also the value stored in the cache, keyed by `url`.
///
/// # Fields
/// - `url`: The service URL the status belongs to
/// - `status`: Free-form status text, e.g. "up"
/// - `details`: Optional free-form detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub url: String,
    pub status: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl ServiceStatus {
    /// Creates a status record without details
    pub fn new(url: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: status.into(),
            details: None,
        }
    }

    /// Attaches a detail message
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("Service url cannot be empty".to_string());
        }
        if self.url.len() > MAX_URL_LENGTH {
            return Some(format!(
                "Service url exceeds maximum length of {} bytes",
                MAX_URL_LENGTH
            ));
        }
        if self.status.trim().is_empty() {
            return Some("Status cannot be empty".to_string());
        }
        None
    }
}

/// Query string for GET /api/v1/service/status
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub service_url: String,
}

/// Query string for DELETE /api/v1/delete
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteQuery {
    pub key: String,
}
