//! Check Security Status Use Case

use std::sync::Arc;

use crate::application::guard::GuardUtilities;
use crate::domain::security_status::SecurityStatus;

/// Raw observations a status check is computed from
#[derive(Debug, Clone, Default)]
pub struct SecurityProbe {
    pub has_https: bool,
    pub session_token: Option<String>,
    pub user_agent: Option<String>,
}

/// Check Security Status Use Case
pub struct CheckSecurityStatusUseCase {
    guard: Arc<GuardUtilities>,
}

impl CheckSecurityStatusUseCase {
    pub fn new(guard: Arc<GuardUtilities>) -> Self {
        Self { guard }
    }

    pub fn execute(&self, probe: &SecurityProbe) -> SecurityStatus {
        let has_https = probe.has_https || self.guard.config().assume_https;

        let has_valid_session = probe
            .session_token
            .as_deref()
            .is_some_and(|token| self.guard.is_structurally_valid_token(token));

        let suspicious_activity = probe
            .user_agent
            .as_deref()
            .is_some_and(|ua| self.guard.looks_automated(ua));

        SecurityStatus::new(
            has_https,
            has_valid_session,
            suspicious_activity,
            self.guard.clock().now_ms(),
        )
    }
}
