//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::CacheError;

/// Default HTTP server port
pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration parameters.
///
/// Read once at startup; the cache is never resized afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of service statuses kept in the cache
    pub max_cache_size: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Key required on status routes, if set
    pub api_key: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CACHE_SIZE` - Cache capacity (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `API_KEY` - Enables the `x-api-key` guard when non-empty
    ///
    /// # Errors
    /// `CacheError::InvalidConfiguration` when a variable is set but does not
    /// parse, or when `MAX_CACHE_SIZE` is zero.
    pub fn from_env() -> Result<Self, CacheError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CacheError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_cache_size = parse_var(&lookup, "MAX_CACHE_SIZE", DEFAULT_CAPACITY)?;
        if max_cache_size == 0 {
            return Err(CacheError::InvalidConfiguration(
                "MAX_CACHE_SIZE must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            max_cache_size,
            server_port: parse_var(&lookup, "SERVER_PORT", DEFAULT_PORT)?,
            api_key: lookup("API_KEY").filter(|key| !key.trim().is_empty()),
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, CacheError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfiguration(format!("{} has an invalid value: {:?}", name, raw))
        }),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_size: DEFAULT_CAPACITY,
            server_port: DEFAULT_PORT,
            api_key: None,
        }
    }
}
