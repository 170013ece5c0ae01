//! Client identification utilities
//!
//! Heuristics over request headers: automated user agents and whether the
//! connection reached us over HTTPS.

use axum::http::{HeaderMap, header};

/// Substrings that mark a user agent as automated (matched case-insensitively)
pub const SUSPICIOUS_PATTERNS: &[&str] = &["bot", "crawler", "spider", "scraper", "automated"];

/// Whether the user agent looks like a bot or scraper
///
/// Advisory only. Any header is trivially spoofed.
pub fn looks_automated(user_agent: &str) -> bool {
    let lower = user_agent.to_lowercase();
    SUSPICIOUS_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Extract the User-Agent header
pub fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
}

/// Whether the request arrived over HTTPS
///
/// Checks the `X-Forwarded-Proto` header set by a reverse proxy (first value
/// in the list).
pub fn is_https(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|protos| protos.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}
