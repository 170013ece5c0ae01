//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - `UserProfile`
//! - `application/` - `SessionStore`, sign-in use case
//! - `infra/` - Obfuscated profile storage, per-browser client storage
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Mock sign-in by email (no password, no server-side account)
//! - Profile persisted obfuscated in client storage under `tm_user`
//! - Session token minted into a `secure; httpOnly; sameSite=strict` cookie
//! - Active-session analytics cookie, written only with analytics consent
//!
//! ## Security Model
//! - Nothing here authenticates anyone; the session token is structural only
//! - Sign-in attempts go through the advisory rate limiter

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session_store::SessionStore;
pub use application::sign_in::{SignInOutput, SignInUseCase};
pub use domain::user_profile::UserProfile;
pub use error::{AuthError, AuthResult};
pub use infra::browser_storage::BrowserStorageRegistry;
pub use presentation::router::auth_router;

#[cfg(test)]
mod tests;
