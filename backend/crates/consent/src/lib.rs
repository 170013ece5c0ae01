//! Consent Backend Module
//!
//! Cookie preference and token manager: per-category consent persisted in a
//! cookie, consent-gated analytics and marketing cookies, secure token
//! cookies, and revocation that sweeps everything outside the necessary
//! allow-list.
//!
//! Clean Architecture structure:
//! - `domain/` - Preferences, categories, cookie names, `CookieStore` trait
//! - `application/` - `CookieManager`
//! - `infra/` - In-memory cookie jar
//! - `presentation/` - HTTP handlers
//!
//! Gated writes re-read the consent cookie every time, so a revocation takes
//! effect on the very next write.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ConsentConfig;
pub use application::cookie_manager::CookieManager;
pub use domain::category::{CategoryInfo, ConsentCategory, cookie_categories};
pub use domain::choice::{ConsentChoice, ConsentState};
pub use domain::preferences::ConsentPreferences;
pub use domain::repository::CookieStore;
pub use error::{ConsentError, ConsentResult};
pub use infra::memory_jar::MemoryCookieJar;
pub use presentation::router::consent_router;
