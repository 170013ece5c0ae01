//! Security Monitor
//!
//! Re-runs the security status check on a fixed interval and publishes each
//! result on a watch channel. The first check runs immediately.
//!
//! The background task is aborted by [`SecurityMonitor::stop`] or when the
//! monitor is dropped, so an owner that goes away never leaves it running.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::check_status::{CheckSecurityStatusUseCase, SecurityProbe};
use crate::application::guard::GuardUtilities;
use crate::domain::security_status::SecurityStatus;

/// Handle to a running periodic security check
pub struct SecurityMonitor {
    receiver: watch::Receiver<Option<SecurityStatus>>,
    handle: JoinHandle<()>,
}

impl SecurityMonitor {
    /// Spawn the check loop on the current tokio runtime
    ///
    /// `probe` is called once per tick to gather fresh observations.
    pub fn spawn<F>(guard: Arc<GuardUtilities>, probe: F) -> Self
    where
        F: Fn() -> SecurityProbe + Send + 'static,
    {
        let period = guard
            .config()
            .status_check_interval
            .max(Duration::from_millis(1));
        let use_case = CheckSecurityStatusUseCase::new(guard);
        let (sender, receiver) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let status = use_case.execute(&probe());
                if status.should_display() {
                    tracing::debug!(
                        level = status.level().as_str(),
                        has_https = status.has_https,
                        has_valid_session = status.has_valid_session,
                        suspicious_activity = status.suspicious_activity,
                        "Security check flagged the session"
                    );
                }
                if sender.send(Some(status)).is_err() {
                    break;
                }
            }
        });

        Self { receiver, handle }
    }

    /// Most recent status, `None` before the first check completes
    pub fn latest(&self) -> Option<SecurityStatus> {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SecurityStatus>> {
        self.receiver.clone()
    }

    /// Cancel the check loop
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for SecurityMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
