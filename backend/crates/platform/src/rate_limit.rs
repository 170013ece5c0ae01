//! Rate Limiting Infrastructure
//!
//! Sliding-window attempt counter kept in client-side storage. Each identifier
//! owns one record, a JSON array of attempt timestamps (Unix ms), stored under
//! `rate_limit_{identifier}`.
//!
//! Advisory only: whoever controls the storage controls the counter.

use std::time::Duration;

use kernel::error::app_error::FailOpen;
use kernel::storage::KeyValueStore;

/// Storage key prefix for attempt records
pub const RATE_LIMIT_KEY_PREFIX: &str = "rate_limit_";

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum attempts allowed in the window
    pub max_attempts: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// When the oldest counted attempt leaves the window
    pub reset_at_ms: i64,
}

/// Storage key for an identifier's attempt record
pub fn storage_key(identifier: &str) -> String {
    format!("{RATE_LIMIT_KEY_PREFIX}{identifier}")
}

/// Check the window for `identifier` and record an attempt when allowed
///
/// Attempts with `now - ts >= window` are dropped. A refused attempt is not
/// recorded. A corrupt record counts as empty and a failed write still
/// allows the attempt.
pub fn check_and_record<S>(
    store: &S,
    identifier: &str,
    config: &RateLimitConfig,
    now_ms: i64,
) -> RateLimitResult
where
    S: KeyValueStore + ?Sized,
{
    let key = storage_key(identifier);
    let window_ms = config.window_ms();

    let mut attempts: Vec<i64> = store
        .get_item(&key)
        .map(|raw| serde_json::from_str(&raw).or_fail_open("rate limit record", Vec::new))
        .unwrap_or_default();
    attempts.retain(|&ts| now_ms.saturating_sub(ts) < window_ms);

    let max_attempts = config.max_attempts as usize;
    if attempts.len() >= max_attempts {
        let oldest = attempts.iter().min().copied().unwrap_or(now_ms);
        tracing::debug!(identifier, attempts = attempts.len(), "Rate limit reached");
        return RateLimitResult {
            allowed: false,
            remaining: 0,
            reset_at_ms: oldest.saturating_add(window_ms),
        };
    }

    attempts.push(now_ms);
    match serde_json::to_string(&attempts) {
        Ok(record) => store
            .set_item(&key, &record)
            .or_fail_open("rate limit record write", || ()),
        Err(e) => tracing::warn!(error = %e, identifier, "Failed to encode rate limit record"),
    }

    let oldest = attempts.iter().min().copied().unwrap_or(now_ms);
    RateLimitResult {
        allowed: true,
        remaining: (max_attempts - attempts.len()) as u32,
        reset_at_ms: oldest.saturating_add(window_ms),
    }
}
