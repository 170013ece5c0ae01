//! Application Configuration
//!
//! Configuration for the consent application layer.

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Consent application configuration
#[derive(Debug, Clone)]
pub struct ConsentConfig {
    /// Lifetime of the consent cookie
    pub consent_days: i64,
    /// Lifetime of analytics and marketing cookies
    pub tracking_cookie_days: i64,
    /// Lifetime of secure token cookies
    pub secure_token_days: i64,
    /// SameSite policy for analytics and marketing cookies
    pub tracking_same_site: SameSite,
    /// Whether to set the Secure flag on cookies the manager writes itself
    pub cookie_secure: bool,
    /// Domain attribute for cookies the manager writes itself
    pub cookie_domain: Option<String>,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            consent_days: 365,
            tracking_cookie_days: 365,
            secure_token_days: 1,
            tracking_same_site: SameSite::Lax,
            cookie_secure: true,
            cookie_domain: None,
        }
    }
}

impl ConsentConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }
}
