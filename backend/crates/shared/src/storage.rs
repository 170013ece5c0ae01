//! Client-Side Key-Value Storage
//!
//! The equivalent of a browser's `localStorage`: string keys, string values,
//! synchronous access. The persisted profile and rate-limit records live here.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

/// Storage result type alias
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a [`KeyValueStore`] write
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The write would exceed the configured storage quota
    #[error("Storage quota of {quota_bytes} bytes exceeded while writing '{key}'")]
    QuotaExceeded { key: String, quota_bytes: usize },
}

/// Synchronous string key-value storage
///
/// Reads never fail: a missing entry is the normal "no value" case.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key` (no-op when absent)
    fn remove_item(&self, key: &str);

    /// All stored keys, in no particular order
    fn keys(&self) -> Vec<String>;

    /// Remove every entry
    fn clear(&self);
}

/// In-memory [`KeyValueStore`] with an optional byte quota
///
/// The quota counts the UTF-8 length of every key and value, the way browsers
/// account for `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes beyond `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Memory store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.lock();

        if let Some(quota_bytes) = self.quota_bytes {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    quota_bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.lock().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
