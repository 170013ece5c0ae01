//! Repository Traits
//!
//! Interface to the browser cookie API. Implementation is in the infra layer.

/// Browser-style cookie store
///
/// Reads see a `name=value; name2=value2` header with names and values still
/// percent-encoded; writes take one `Set-Cookie` attribute string. A write
/// whose expiry is in the past removes the cookie.
pub trait CookieStore: Send + Sync {
    /// Current cookies as a `Cookie` request header value
    fn cookie_header(&self) -> String;

    /// Apply one `Set-Cookie` string
    fn write(&self, set_cookie: &str);
}
