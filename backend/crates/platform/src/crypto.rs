//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate `byte_len` random bytes encoded as lowercase hex
///
/// The result is `2 * byte_len` characters long.
pub fn random_hex_token(byte_len: usize) -> String {
    hex::encode(random_bytes(byte_len))
}

/// Check that `s` is exactly `len` characters of lowercase hex
pub fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// XOR `data` with `pad`, repeating the pad as needed
///
/// Applying the same pad twice returns the original bytes. An empty pad
/// leaves the data unchanged.
pub fn xor_with_pad(data: &[u8], pad: &[u8]) -> Vec<u8> {
    if pad.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .zip(pad.iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
