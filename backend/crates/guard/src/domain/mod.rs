//! Domain Layer
//!
//! This layer contains:
//! - The obfuscation key (value object, zeroized on drop)
//! - Security status and the levels derived from it

pub mod obfuscation_key;
pub mod security_status;
