//! Per-Browser Client Storage
//!
//! The HTTP host has no `localStorage`, so it keeps one in-memory
//! [`MemoryStore`] per browser, keyed by the browser's `security_token`
//! cookie. The least recently seen browser is dropped when the registry is
//! full.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kernel::clock::SharedClock;
use kernel::storage::MemoryStore;

use crate::application::config::AuthConfig;

struct Bucket {
    storage: Arc<MemoryStore>,
    last_seen_ms: i64,
}

pub struct BrowserStorageRegistry {
    buckets: Mutex<HashMap<String, Bucket>>,
    max_browsers: usize,
    quota_bytes: usize,
    clock: SharedClock,
}

impl BrowserStorageRegistry {
    pub fn new(max_browsers: usize, quota_bytes: usize, clock: SharedClock) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            max_browsers: max_browsers.max(1),
            quota_bytes,
            clock,
        }
    }

    pub fn from_config(config: &AuthConfig, clock: SharedClock) -> Self {
        Self::new(config.max_browsers, config.browser_storage_quota_bytes, clock)
    }

    /// Storage for the browser identified by `browser_token`, created on first use
    pub fn storage_for(&self, browser_token: &str) -> Arc<MemoryStore> {
        let now_ms = self.clock.now_ms();
        let mut buckets = self.lock();

        if let Some(bucket) = buckets.get_mut(browser_token) {
            bucket.last_seen_ms = now_ms;
            return bucket.storage.clone();
        }

        if buckets.len() >= self.max_browsers {
            evict_least_recently_seen(&mut buckets);
        }

        let storage = Arc::new(MemoryStore::with_quota(self.quota_bytes));
        buckets.insert(
            browser_token.to_string(),
            Bucket {
                storage: storage.clone(),
                last_seen_ms: now_ms,
            },
        );
        storage
    }

    /// Number of browsers with storage
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Bucket>> {
        self.buckets.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Browser storage mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

fn evict_least_recently_seen(buckets: &mut HashMap<String, Bucket>) {
    let oldest = buckets
        .iter()
        .min_by_key(|(_, bucket)| bucket.last_seen_ms)
        .map(|(token, _)| token.clone());

    if let Some(token) = oldest {
        buckets.remove(&token);
        tracing::debug!("Evicted least recently seen browser storage");
    }
}
