//! Application Configuration
//!
//! Configuration for the Auth application layer.

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Client storage key holding the obfuscated profile
    pub profile_storage_key: String,
    /// Cookie holding the session token
    pub session_cookie_name: String,
    /// Analytics cookie marking an active session
    pub active_session_cookie_name: String,
    /// Prefix for the sign-in rate limit identifier
    pub sign_in_rate_limit_prefix: String,
    /// Browsers whose client storage is kept in memory at once
    pub max_browsers: usize,
    /// Client storage quota per browser
    pub browser_storage_quota_bytes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            profile_storage_key: "tm_user".to_string(),
            session_cookie_name: "session_token".to_string(),
            active_session_cookie_name: "user_session".to_string(),
            sign_in_rate_limit_prefix: "sign_in_".to_string(),
            max_browsers: 10_000,
            browser_storage_quota_bytes: 5 * 1024 * 1024, // 5 MiB, like localStorage
        }
    }
}

impl AuthConfig {
    /// Create config for development (small in-memory footprint)
    pub fn development() -> Self {
        Self {
            max_browsers: 100,
            ..Default::default()
        }
    }

    /// Rate limit identifier for sign-in attempts with `email`
    pub fn sign_in_identifier(&self, email: &str) -> String {
        format!("{}{}", self.sign_in_rate_limit_prefix, email)
    }
}
