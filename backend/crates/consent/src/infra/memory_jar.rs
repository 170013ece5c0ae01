//! In-Memory Cookie Jar
//!
//! [`CookieStore`] that behaves like one browser's cookie jar: writes are
//! applied immediately, expired cookies are invisible to reads, and an
//! epoch-expired write removes the cookie. Cookies are keyed by name only.
//!
//! Every write is also queued so an HTTP handler can forward it to the real
//! browser as a `Set-Cookie` header.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use kernel::clock::SharedClock;
use platform::cookie::{parse_cookie_header, parse_set_cookie};

use crate::domain::repository::CookieStore;

#[derive(Debug, Clone)]
struct StoredCookie {
    /// Percent-encoded, as sent on the wire
    value: String,
    expires_ms: Option<i64>,
}

pub struct MemoryCookieJar {
    cookies: Mutex<BTreeMap<String, StoredCookie>>,
    pending: Mutex<Vec<String>>,
    clock: SharedClock,
}

impl MemoryCookieJar {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            cookies: Mutex::new(BTreeMap::new()),
            pending: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Seed the jar from a request's `Cookie` header
    ///
    /// Seeded cookies are not queued as writes. When a name repeats, the first
    /// pair wins, as browsers send the most path-specific cookie first.
    pub fn from_request_header(cookie_header: Option<&str>, clock: SharedClock) -> Self {
        let jar = Self::new(clock);
        if let Some(header) = cookie_header {
            let mut cookies = jar.lock_cookies();
            for (name, value) in parse_cookie_header(header) {
                cookies.entry(name).or_insert(StoredCookie {
                    value,
                    expires_ms: None,
                });
            }
        }
        jar
    }

    /// Drain the `Set-Cookie` strings written since the last call
    pub fn take_set_cookies(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock_pending())
    }

    /// Names of the live cookies
    pub fn names(&self) -> Vec<String> {
        let now_ms = self.clock.now_ms();
        self.lock_cookies()
            .iter()
            .filter(|(_, cookie)| is_live(cookie, now_ms))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn lock_cookies(&self) -> MutexGuard<'_, BTreeMap<String, StoredCookie>> {
        self.cookies.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Cookie jar mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<String>> {
        self.pending.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Cookie jar mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

fn is_live(cookie: &StoredCookie, now_ms: i64) -> bool {
    cookie.expires_ms.is_none_or(|expires_ms| expires_ms > now_ms)
}

impl CookieStore for MemoryCookieJar {
    fn cookie_header(&self) -> String {
        let now_ms = self.clock.now_ms();
        self.lock_cookies()
            .iter()
            .filter(|(_, cookie)| is_live(cookie, now_ms))
            .map(|(name, cookie)| format!("{}={}", name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, set_cookie: &str) {
        let now_ms = self.clock.now_ms();
        let Some(parsed) = parse_set_cookie(set_cookie, now_ms) else {
            tracing::warn!(set_cookie, "Ignoring malformed Set-Cookie string");
            return;
        };

        {
            let mut cookies = self.lock_cookies();
            if parsed.is_expired(now_ms) {
                cookies.remove(&parsed.name);
            } else {
                cookies.insert(
                    parsed.name,
                    StoredCookie {
                        value: parsed.value,
                        expires_ms: parsed.expires_ms,
                    },
                );
            }
        }

        self.lock_pending().push(set_cookie.to_string());
    }
}
