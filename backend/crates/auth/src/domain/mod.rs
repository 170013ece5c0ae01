//! Domain Layer
//!
//! Contains the signed-in user's profile.

pub mod user_profile;

// Re-exports
pub use user_profile::UserProfile;
