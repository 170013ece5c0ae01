//! Guard Backend Module
//!
//! Client-side guard utilities: profile obfuscation, session-token minting,
//! input and password checks, user-agent heuristics, an advisory rate limiter
//! and a periodic security status monitor.
//!
//! Clean Architecture structure:
//! - `domain/` - Obfuscation key, security status
//! - `application/` - `GuardUtilities`, status check, monitor
//! - `presentation/` - HTTP handlers
//!
//! ## Security Model
//! - Nothing here is a security boundary; every check is advisory
//! - The obfuscation key lives as long as its `GuardUtilities` instance
//! - Blobs carry a key id, so a rotated key is detected instead of producing garbage

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::check_status::{CheckSecurityStatusUseCase, SecurityProbe};
pub use application::config::GuardConfig;
pub use application::guard::GuardUtilities;
pub use application::monitor::SecurityMonitor;
pub use domain::obfuscation_key::ObfuscationKey;
pub use domain::security_status::{SecurityLevel, SecurityStatus};
pub use error::{GuardError, GuardResult};
pub use presentation::router::guard_router;

#[cfg(test)]
mod tests;
