//! Time Source
//!
//! Millisecond wall-clock abstraction. Cookie expiry and rate-limit windows read
//! time through [`Clock`] so tests can move time forward deterministically.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current Unix time in milliseconds
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Shared handle passed to every component that needs the time
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock backed by `chrono::Utc::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a shared system clock
    pub fn shared() -> SharedClock {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock for tests and simulations
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
        }
    }

    /// Move the clock forward by `delta_ms`
    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set_ms(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
