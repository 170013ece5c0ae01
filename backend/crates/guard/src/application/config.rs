//! Application Configuration
//!
//! Configuration for the guard application layer.

use std::time::Duration;

/// Re-export RateLimitConfig from platform
pub use platform::rate_limit::RateLimitConfig;

/// Guard application configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Default limits for `within_rate_limit`
    pub rate_limit: RateLimitConfig,
    /// Period of the security status monitor
    pub status_check_interval: Duration,
    /// Cookie holding the session token
    pub session_cookie_name: String,
    /// Treat every request as HTTPS (TLS terminated by a proxy that sets no header)
    pub assume_https: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            status_check_interval: Duration::from_secs(30),
            session_cookie_name: "session_token".to_string(),
            assume_https: false,
        }
    }
}

impl GuardConfig {
    /// Create config for development (plain HTTP on localhost counts as secure)
    pub fn development() -> Self {
        Self {
            assume_https: true,
            ..Default::default()
        }
    }

    pub fn status_check_interval_ms(&self) -> i64 {
        self.status_check_interval.as_millis() as i64
    }
}
