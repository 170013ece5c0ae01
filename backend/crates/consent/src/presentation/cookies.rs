//! Request-Scoped Cookie Plumbing
//!
//! Each request gets its own jar seeded from the `Cookie` header. Whatever
//! the handler writes is sent back as `Set-Cookie` headers, so `httpOnly` and
//! `secure` are enforced by the browser.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName, header};
use axum::response::AppendHeaders;
use kernel::clock::SharedClock;

use crate::application::config::ConsentConfig;
use crate::application::cookie_manager::CookieManager;
use crate::infra::memory_jar::MemoryCookieJar;

/// `Set-Cookie` headers for a response
pub type SetCookieHeaders = AppendHeaders<Vec<(HeaderName, String)>>;

/// Cookie manager over a jar seeded from the request
pub fn request_cookie_manager(
    headers: &HeaderMap,
    clock: SharedClock,
    config: Arc<ConsentConfig>,
) -> CookieManager<MemoryCookieJar> {
    let cookie_header = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok());
    let jar = MemoryCookieJar::from_request_header(cookie_header, clock.clone());
    CookieManager::new(Arc::new(jar), clock, config)
}

/// Drain the jar's writes into response headers
pub fn set_cookie_headers(jar: &MemoryCookieJar) -> SetCookieHeaders {
    AppendHeaders(
        jar.take_set_cookies()
            .into_iter()
            .map(|set_cookie| (header::SET_COOKIE, set_cookie))
            .collect(),
    )
}
