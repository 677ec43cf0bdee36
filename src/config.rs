//! Configuration Module
//!
//! Handles loading server configuration from environment variables. Values are read
//! once at startup.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Name used to identify the device behind this server
    pub device_identifier: String,
    /// How long a device reading is served from cache, in milliseconds; 0 disables caching
    pub throttle_ttl_ms: u64,
    /// Consecutive delivery retries allowed per reading
    pub stream_max_retries: u32,
    /// Wait between delivery retries, in milliseconds
    pub stream_retry_delay_ms: u64,
    /// Readings buffered per stream before the consumer counts as behind
    pub stream_buffer: usize,
    /// How long a delivery waits for buffer space, in milliseconds
    pub stream_send_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 6840)
    /// - `DEVICE_IDENTIFIER` - Device identifier (default: "temper")
    /// - `THROTTLE_TTL_MS` - Cached reading lifetime, 0 reads the device every time (default: 500)
    /// - `STREAM_MAX_RETRIES` - Delivery retries per reading (default: 5)
    /// - `STREAM_RETRY_DELAY_MS` - Delay between retries (default: 1000)
    /// - `STREAM_BUFFER` - Per-stream buffer size (default: 16)
    /// - `STREAM_SEND_TIMEOUT_MS` - Wait for a slow consumer before a delivery fails (default: 5000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            device_identifier: env::var("DEVICE_IDENTIFIER")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.device_identifier),
            throttle_ttl_ms: parse_var("THROTTLE_TTL_MS").unwrap_or(defaults.throttle_ttl_ms),
            stream_max_retries: parse_var("STREAM_MAX_RETRIES")
                .unwrap_or(defaults.stream_max_retries),
            stream_retry_delay_ms: parse_var("STREAM_RETRY_DELAY_MS")
                .unwrap_or(defaults.stream_retry_delay_ms),
            stream_buffer: parse_var("STREAM_BUFFER")
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.stream_buffer),
            stream_send_timeout_ms: parse_var("STREAM_SEND_TIMEOUT_MS")
                .unwrap_or(defaults.stream_send_timeout_ms),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 6840,
            device_identifier: "temper".to_string(),
            throttle_ttl_ms: 500,
            stream_max_retries: 5,
            stream_retry_delay_ms: 1000,
            stream_buffer: 16,
            stream_send_timeout_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 6840);
        assert_eq!(config.device_identifier, "temper");
        assert_eq!(config.throttle_ttl_ms, 500);
        assert_eq!(config.stream_max_retries, 5);
        assert_eq!(config.stream_retry_delay_ms, 1000);
        assert_eq!(config.stream_buffer, 16);
        assert_eq!(config.stream_send_timeout_ms, 5000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "SERVER_PORT",
            "DEVICE_IDENTIFIER",
            "THROTTLE_TTL_MS",
            "STREAM_MAX_RETRIES",
            "STREAM_RETRY_DELAY_MS",
            "STREAM_BUFFER",
            "STREAM_SEND_TIMEOUT_MS",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.server_port, 6840);
        assert_eq!(config.device_identifier, "temper");
        assert_eq!(config.throttle_ttl_ms, 500);
        assert_eq!(config.stream_buffer, 16);
    }
}
