//! Well-known cookie names

/// Persisted consent preferences
pub const CONSENT_COOKIE: &str = "cookie_consent";

/// Session token minted at sign-in
pub const SESSION_TOKEN_COOKIE: &str = "session_token";

pub const CSRF_TOKEN_COOKIE: &str = "csrf_token";

/// Identifies the browser's client-side storage bucket
pub const SECURITY_TOKEN_COOKIE: &str = "security_token";

/// Cookies that survive a consent revocation
pub const NECESSARY_COOKIES: [&str; 4] = [
    CONSENT_COOKIE,
    SESSION_TOKEN_COOKIE,
    CSRF_TOKEN_COOKIE,
    SECURITY_TOKEN_COOKIE,
];

/// Analytics cookie marking an active signed-in session
pub const USER_SESSION_COOKIE: &str = "user_session";
pub const USER_SESSION_ACTIVE: &str = "active";

/// Cookies written by the consent banner once a category is allowed
pub const ANALYTICS_BANNER_COOKIE: &str = "testmind_analytics";
pub const MARKETING_BANNER_COOKIE: &str = "testmind_marketing";
pub const BANNER_COOKIE_ENABLED: &str = "enabled";

pub fn is_necessary_cookie(name: &str) -> bool {
    NECESSARY_COOKIES.contains(&name)
}
