//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod session_store;
pub mod sign_in;

// Re-exports
pub use config::AuthConfig;
pub use session_store::SessionStore;
pub use sign_in::{SignInOutput, SignInUseCase};
