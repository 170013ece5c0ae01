//! Cookie Wire Format
//!
//! Builds `Set-Cookie` attribute strings in the fixed attribute order
//! `name=value; expires=<HTTP-date>; path=<p>; domain=<d>; secure; httpOnly; sameSite=<mode>`
//! and parses them back, together with `Cookie` request headers.
//!
//! Names and values are percent-encoded on write and decoded on read.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Expiry date used to force a cookie's removal
pub const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Cookie encoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("Cookie component is not valid percent-encoded UTF-8: {0}")]
    InvalidEncoding(String),
}

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "strict",
            SameSite::Lax => "lax",
            SameSite::None => "none",
        }
    }

    /// Parse a SameSite attribute value (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(SameSite::Strict),
            "lax" => Some(SameSite::Lax),
            "none" => Some(SameSite::None),
            _ => None,
        }
    }
}

/// When a cookie expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Absolute Unix time in milliseconds
    At(i64),
    /// Number of days from the time of writing
    Days(i64),
}

impl Expiry {
    /// Resolve to an absolute Unix time in milliseconds
    pub fn resolve(&self, now_ms: i64) -> i64 {
        match *self {
            Expiry::At(at_ms) => at_ms,
            Expiry::Days(days) => now_ms.saturating_add(days.saturating_mul(MS_PER_DAY)),
        }
    }
}

/// Attributes applied when writing a cookie
///
/// Defaults: no expiry (session cookie), path `/`, no domain, `secure`,
/// not `httpOnly`, `sameSite=strict`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub expires: Option<Expiry>,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            expires: None,
            path: "/".to_string(),
            domain: None,
            secure: true,
            http_only: false,
            same_site: SameSite::Strict,
        }
    }
}

impl CookieOptions {
    /// Expire `days` from the time of writing; zero days leaves a session cookie
    pub fn expires_in_days(mut self, days: i64) -> Self {
        self.expires = (days != 0).then_some(Expiry::Days(days));
        self
    }

    pub fn expires_at_ms(mut self, at_ms: i64) -> Self {
        self.expires = Some(Expiry::At(at_ms));
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Build Set-Cookie header value
    ///
    /// Day-count expiries are resolved against `now_ms`.
    pub fn build_set_cookie(&self, name: &str, value: &str, now_ms: i64) -> String {
        let mut cookie = format!("{}={}", encode_component(name), encode_component(value));

        if let Some(expires) = self.expires {
            cookie.push_str(&format!("; expires={}", format_http_date(expires.resolve(now_ms))));
        }

        cookie.push_str(&format!("; path={}", self.path));

        if let Some(domain) = &self.domain {
            cookie.push_str(&format!("; domain={}", domain));
        }
        if self.secure {
            cookie.push_str("; secure");
        }
        if self.http_only {
            cookie.push_str("; httpOnly");
        }

        cookie.push_str(&format!("; sameSite={}", self.same_site.as_str()));
        cookie
    }
}

/// Build Set-Cookie header for deletion (expired at the epoch)
pub fn build_delete_cookie(name: &str, path: &str, domain: Option<&str>) -> String {
    let mut cookie = format!(
        "{}=; expires={}; path={}",
        encode_component(name),
        EPOCH_HTTP_DATE,
        path
    );
    if let Some(domain) = domain {
        cookie.push_str(&format!("; domain={}", domain));
    }
    cookie
}

/// Format Unix milliseconds as an HTTP-date (`Thu, 01 Jan 1970 00:00:00 GMT`)
pub fn format_http_date(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .format(HTTP_DATE_FORMAT)
        .to_string()
}

/// Parse an HTTP-date back into Unix milliseconds
pub fn parse_http_date(value: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Percent-encode a cookie name or value
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Decode a percent-encoded cookie name or value
pub fn decode_component(encoded: &str) -> Result<String, CookieError> {
    urlencoding::decode(encoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| CookieError::InvalidEncoding(encoded.to_string()))
}

/// Split a `Cookie` header into its still-encoded `(name, value)` pairs
///
/// Entries without `=` are skipped. Order is preserved.
pub fn parse_cookie_header(cookie_header: &str) -> Vec<(String, String)> {
    cookie_header
        .split(';')
        .filter_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// Find the still-encoded value of `name` in a `Cookie` header
pub fn find_cookie(cookie_header: &str, name: &str) -> Option<String> {
    let encoded_name = encode_component(name);
    parse_cookie_header(cookie_header)
        .into_iter()
        .find_map(|(key, value)| (key == encoded_name).then_some(value))
}

/// Extract and decode a cookie value from request headers
///
/// Values that fail to decode are returned as sent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    let raw = find_cookie(cookie_header, name)?;
    Some(decode_component(&raw).unwrap_or(raw))
}

/// A parsed `Set-Cookie` string
///
/// `name` and `value` stay percent-encoded, as a browser stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub expires_ms: Option<i64>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl SetCookie {
    /// Whether the cookie is already expired at `now_ms`
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_ms.is_some_and(|expires_ms| expires_ms <= now_ms)
    }
}

/// Parse a `Set-Cookie` string
///
/// Attribute names are case-insensitive. `Max-Age` (seconds from `now_ms`)
/// takes precedence over `expires`. Returns `None` when the name is empty or
/// the first segment has no `=`.
pub fn parse_set_cookie(set_cookie: &str, now_ms: i64) -> Option<SetCookie> {
    let mut segments = set_cookie.split(';');
    let (name, value) = segments.next()?.trim().split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut parsed = SetCookie {
        name: name.to_string(),
        value: value.trim().to_string(),
        expires_ms: None,
        path: None,
        domain: None,
        secure: false,
        http_only: false,
        same_site: None,
    };
    let mut max_age_ms = None;

    for attribute in segments {
        let attribute = attribute.trim();
        let (key, attr_value) = match attribute.split_once('=') {
            Some((key, attr_value)) => (key.trim(), Some(attr_value.trim())),
            None => (attribute, None),
        };

        match (key.to_ascii_lowercase().as_str(), attr_value) {
            ("expires", Some(date)) => parsed.expires_ms = parse_http_date(date),
            ("max-age", Some(secs)) => {
                max_age_ms = secs
                    .parse::<i64>()
                    .ok()
                    .map(|secs| now_ms.saturating_add(secs.saturating_mul(1000)));
            }
            ("path", Some(path)) => parsed.path = Some(path.to_string()),
            ("domain", Some(domain)) => parsed.domain = Some(domain.to_string()),
            ("secure", _) => parsed.secure = true,
            ("httponly", _) => parsed.http_only = true,
            ("samesite", Some(mode)) => parsed.same_site = SameSite::parse(mode),
            _ => {}
        }
    }

    if max_age_ms.is_some() {
        parsed.expires_ms = max_age_ms;
    }

    Some(parsed)
}
