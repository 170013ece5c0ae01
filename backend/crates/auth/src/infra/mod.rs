//! Infrastructure Layer
//!
//! Client storage implementations.

pub mod browser_storage;
pub mod profile_vault;

pub use browser_storage::BrowserStorageRegistry;
pub use profile_vault::ProfileVault;
