//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries before size-based eviction kicks in
    pub cache_size: u64,
    /// Entry lifetime in milliseconds before an entry is considered stale
    pub entry_ttl_ms: i64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SIZE` - Maximum cache entries (default: 100000)
    /// - `CACHE_ENTRY_TTL` - Entry TTL in milliseconds (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            cache_size: env::var("CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100_000),
            entry_ttl_ms: env::var("CACHE_ENTRY_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: 100_000,
            entry_ttl_ms: 10_000,
            server_port: 3000,
        }
    }
}
