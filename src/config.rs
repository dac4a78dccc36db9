//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of fast-tier entries
    pub capacity: usize,
    /// Default TTL in minutes for entries cached without an explicit TTL
    pub default_ttl_minutes: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Durable-tier directory; empty selects the in-memory substrate
    pub data_dir: String,
    /// Metrics report interval in seconds
    pub report_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum fast-tier entries (default: 100)
    /// - `DEFAULT_TTL_MINUTES` - Default TTL in minutes (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATA_DIR` - Durable-tier directory (default: restash-data)
    /// - `REPORT_INTERVAL` - Metrics report cadence in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            default_ttl_minutes: env::var("DEFAULT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL.as_secs() / 60),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "restash-data".to_string()),
            report_interval: env::var("REPORT_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// The default TTL as a Duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_minutes * 60)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl_minutes: DEFAULT_TTL.as_secs() / 60,
            server_port: 3000,
            data_dir: "restash-data".to_string(),
            report_interval: 60,
        }
    }
}
