//! Obfuscation Key
//!
//! 32 random bytes used as a repeating XOR pad. The first four bytes of the
//! key's SHA-256 digest identify it, so a blob written under one key can be
//! told apart from a blob written under another.

use std::fmt;

use platform::crypto::{random_bytes, sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{GuardError, GuardResult};

/// Key length in bytes
pub const KEY_LEN: usize = 32;

/// Length of the key id prefix carried by every blob
pub const KEY_ID_LEN: usize = 4;

/// XOR pad key, erased from memory on drop
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Debug output shows only the key id
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ObfuscationKey([u8; KEY_LEN]);

impl ObfuscationKey {
    /// Generate a fresh key from the OS random number generator
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&random_bytes(KEY_LEN));
        Self(key)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key from 64 hex characters
    pub fn from_hex(hex_key: &str) -> GuardResult<Self> {
        let mut bytes = hex::decode(hex_key.trim())
            .map_err(|e| GuardError::InvalidKey(e.to_string()))?;

        if bytes.len() != KEY_LEN {
            let actual = bytes.len();
            bytes.zeroize();
            return Err(GuardError::InvalidKey(format!(
                "expected {KEY_LEN} bytes, got {actual}"
            )));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self(key))
    }

    /// Lowercase hex encoding, for persisting the key
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// First bytes of SHA-256(key)
    pub fn key_id(&self) -> [u8; KEY_ID_LEN] {
        let digest = sha256(&self.0);
        let mut id = [0u8; KEY_ID_LEN];
        id.copy_from_slice(&digest[..KEY_ID_LEN]);
        id
    }
}

impl fmt::Debug for ObfuscationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObfuscationKey")
            .field("id", &hex::encode(self.key_id()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_random() {
        assert_ne!(ObfuscationKey::generate(), ObfuscationKey::generate());
    }

    #[test]
    fn test_hex_round_trip() {
        let key = ObfuscationKey::generate();
        let restored = ObfuscationKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key, restored);
        assert_eq!(key.key_id(), restored.key_id());
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(matches!(
            ObfuscationKey::from_hex("zz"),
            Err(GuardError::InvalidKey(_))
        ));
        assert!(matches!(
            ObfuscationKey::from_hex("abcd"),
            Err(GuardError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_key_id_differs_between_keys() {
        let a = ObfuscationKey::from_bytes([1u8; KEY_LEN]);
        let b = ObfuscationKey::from_bytes([2u8; KEY_LEN]);
        assert_ne!(a.key_id(), b.key_id());
    }

    #[test]
    fn test_debug_redaction() {
        let key = ObfuscationKey::from_bytes([0xab; KEY_LEN]);
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("ObfuscationKey"));
        assert!(!debug_output.contains(&key.to_hex()));
    }
}
