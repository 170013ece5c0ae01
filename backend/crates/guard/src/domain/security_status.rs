//! Security Status
//!
//! Snapshot of the client's security posture and the banner level derived
//! from it.

use serde::Serialize;

/// Severity shown by the security banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Secure,
    Warning,
    Critical,
}

impl SecurityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Secure => "secure",
            SecurityLevel::Warning => "warning",
            SecurityLevel::Critical => "critical",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            SecurityLevel::Secure => "Security Status: All Systems Secure",
            SecurityLevel::Warning => "Security Notice: Connection Not Fully Secure",
            SecurityLevel::Critical => "Security Alert: Suspicious Activity Detected",
        }
    }
}

/// Result of one security check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityStatus {
    /// Transport is trusted (currently the same as `has_https`)
    pub is_secure: bool,
    pub has_https: bool,
    /// A structurally valid session token is present
    pub has_valid_session: bool,
    pub last_checked_ms: i64,
    /// The user agent matched a bot pattern
    pub suspicious_activity: bool,
}

impl SecurityStatus {
    pub fn new(
        has_https: bool,
        has_valid_session: bool,
        suspicious_activity: bool,
        last_checked_ms: i64,
    ) -> Self {
        Self {
            is_secure: has_https,
            has_https,
            has_valid_session,
            last_checked_ms,
            suspicious_activity,
        }
    }

    /// Suspicious activity wins over an insecure transport, which wins over a
    /// missing session.
    pub fn level(&self) -> SecurityLevel {
        if self.suspicious_activity {
            SecurityLevel::Critical
        } else if !self.is_secure || !self.has_valid_session {
            SecurityLevel::Warning
        } else {
            SecurityLevel::Secure
        }
    }

    /// The banner stays hidden while everything is fine
    pub fn should_display(&self) -> bool {
        self.level() != SecurityLevel::Secure
    }

    /// Advice listed under the banner for the current level
    pub fn recommendations(&self) -> Vec<&'static str> {
        match self.level() {
            SecurityLevel::Secure => Vec::new(),
            SecurityLevel::Warning => {
                let mut items = Vec::new();
                if !self.has_https {
                    items.push("Enable HTTPS for secure data transmission");
                }
                if !self.has_valid_session {
                    items.push("Refresh your session or log in again");
                }
                items.push("Keep your browser and security software updated");
                items.push("Use strong, unique passwords");
                items
            }
            SecurityLevel::Critical => vec![
                "Suspicious activity detected in your session",
                "Please log out and log back in immediately",
                "Contact support if you notice unauthorized access",
                "Consider changing your password",
            ],
        }
    }
}
