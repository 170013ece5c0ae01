//! Guard Utilities
//!
//! One instance per running application, shared by reference. Holds the
//! obfuscation key for its whole lifetime; a new instance means a new key,
//! and blobs from the old one no longer decode.
//!
//! Obfuscated blob layout (base64, standard alphabet):
//!
//! ```text
//! key_id[4] || plaintext XOR repeating key
//! ```
//!
//! This is obfuscation, not encryption. It keeps values out of casual view in
//! client storage and nothing more.

use std::fmt;

use kernel::clock::{SharedClock, SystemClock};
use kernel::error::app_error::FailOpen;
use kernel::storage::KeyValueStore;
use platform::crypto::{
    constant_time_eq, from_base64, is_lower_hex, random_hex_token, to_base64, xor_with_pad,
};
use platform::password::PasswordStrength;
use platform::rate_limit::{RateLimitResult, check_and_record};

use crate::application::config::{GuardConfig, RateLimitConfig};
use crate::domain::obfuscation_key::{KEY_ID_LEN, ObfuscationKey};
use crate::error::{GuardError, GuardResult};

/// Random bytes per session token
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Hex length of a session token
pub const SESSION_TOKEN_LEN: usize = SESSION_TOKEN_BYTES * 2;

/// Client-side guard utilities
pub struct GuardUtilities {
    key: ObfuscationKey,
    clock: SharedClock,
    config: GuardConfig,
}

impl fmt::Debug for GuardUtilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardUtilities")
            .field("key", &self.key)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GuardUtilities {
    /// Create with a freshly generated key and the system clock
    pub fn new(config: GuardConfig) -> Self {
        Self::with_key(ObfuscationKey::generate(), SystemClock::shared(), config)
    }

    pub fn with_key(key: ObfuscationKey, clock: SharedClock, config: GuardConfig) -> Self {
        tracing::debug!(key = ?key, "Guard utilities initialized");
        Self { key, clock, config }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    pub fn key_id(&self) -> [u8; KEY_ID_LEN] {
        self.key.key_id()
    }

    // ========================================================================
    // Obfuscation
    // ========================================================================

    /// Mask `plaintext` with the instance key
    ///
    /// Deterministic for a given key.
    pub fn obfuscate(&self, plaintext: &str) -> String {
        let mut blob = Vec::with_capacity(KEY_ID_LEN + plaintext.len());
        blob.extend_from_slice(&self.key.key_id());
        blob.extend(xor_with_pad(plaintext.as_bytes(), self.key.as_bytes()));
        to_base64(&blob)
    }

    /// Reverse [`obfuscate`](Self::obfuscate)
    pub fn deobfuscate(&self, blob: &str) -> GuardResult<String> {
        let bytes = from_base64(blob)?;
        if bytes.len() < KEY_ID_LEN {
            return Err(GuardError::Truncated);
        }

        let (key_id, masked) = bytes.split_at(KEY_ID_LEN);
        if !constant_time_eq(key_id, &self.key.key_id()) {
            return Err(GuardError::KeyMismatch);
        }

        Ok(String::from_utf8(xor_with_pad(masked, self.key.as_bytes()))?)
    }

    /// Deobfuscate, returning the input unchanged on any failure
    pub fn deobfuscate_or_passthrough(&self, blob: &str) -> String {
        self.deobfuscate(blob)
            .or_fail_open("deobfuscate", || blob.to_string())
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// 32 OS-random bytes as 64 lowercase hex characters
    pub fn generate_random_token(&self) -> String {
        random_hex_token(SESSION_TOKEN_BYTES)
    }

    /// Shape check only: 64 lowercase hex characters
    pub fn is_structurally_valid_token(&self, token: &str) -> bool {
        is_lower_hex(token, SESSION_TOKEN_LEN)
    }

    // ========================================================================
    // Input checks
    // ========================================================================

    pub fn sanitize(&self, input: &str) -> String {
        platform::input::sanitize_input(input)
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        platform::input::is_valid_email(email)
    }

    pub fn check_password_strength(&self, password: &str) -> PasswordStrength {
        platform::password::check_password_strength(password)
    }

    pub fn looks_automated(&self, user_agent: &str) -> bool {
        platform::client::looks_automated(user_agent)
    }

    pub fn is_valid_card_number(&self, number: &str) -> bool {
        platform::input::is_valid_card_number(number)
    }

    // ========================================================================
    // Rate limiting (advisory)
    // ========================================================================

    /// Record an attempt for `identifier` under the configured limits
    pub fn within_rate_limit<S>(&self, storage: &S, identifier: &str) -> bool
    where
        S: KeyValueStore + ?Sized,
    {
        self.within_rate_limit_with(storage, identifier, &self.config.rate_limit)
    }

    pub fn within_rate_limit_with<S>(
        &self,
        storage: &S,
        identifier: &str,
        config: &RateLimitConfig,
    ) -> bool
    where
        S: KeyValueStore + ?Sized,
    {
        self.check_rate_limit(storage, identifier, config).allowed
    }

    /// Like [`within_rate_limit_with`](Self::within_rate_limit_with), with the
    /// remaining budget and reset time
    pub fn check_rate_limit<S>(
        &self,
        storage: &S,
        identifier: &str,
        config: &RateLimitConfig,
    ) -> RateLimitResult
    where
        S: KeyValueStore + ?Sized,
    {
        check_and_record(storage, identifier, config, self.clock.now_ms())
    }
}
