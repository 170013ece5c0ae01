//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" shared by the guard, consent and
//! auth crates:
//! - Common error types, result aliases and the fail-open policy helpers
//! - A swappable time source ([`clock::Clock`])
//! - Client-side key-value storage ([`storage::KeyValueStore`])
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod clock;
pub mod storage;
