//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::security_status::{SecurityLevel, SecurityStatus};

/// Response for GET /api/security/status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStatusResponse {
    pub is_secure: bool,
    pub has_https: bool,
    pub has_valid_session: bool,
    pub last_checked_ms: i64,
    pub suspicious_activity: bool,
    pub level: SecurityLevel,
    pub headline: &'static str,
    pub show_banner: bool,
    pub recommendations: Vec<&'static str>,
}

impl From<SecurityStatus> for SecurityStatusResponse {
    fn from(status: SecurityStatus) -> Self {
        let level = status.level();
        Self {
            is_secure: status.is_secure,
            has_https: status.has_https,
            has_valid_session: status.has_valid_session,
            last_checked_ms: status.last_checked_ms,
            suspicious_activity: status.suspicious_activity,
            level,
            headline: level.headline(),
            show_banner: status.should_display(),
            recommendations: status.recommendations(),
        }
    }
}

/// Request for POST /api/security/password-strength
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordStrengthRequest {
    pub password: String,
}

/// Response for POST /api/security/password-strength
#[derive(Debug, Clone, Serialize)]
pub struct PasswordStrengthResponse {
    pub ok: bool,
    pub violations: Vec<String>,
}

/// Request for POST /api/security/email
#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Response for POST /api/security/email
#[derive(Debug, Clone, Serialize)]
pub struct EmailResponse {
    pub valid: bool,
}

/// Request for POST /api/security/sanitize
#[derive(Debug, Clone, Deserialize)]
pub struct SanitizeRequest {
    pub input: String,
}

/// Response for POST /api/security/sanitize
#[derive(Debug, Clone, Serialize)]
pub struct SanitizeResponse {
    pub sanitized: String,
}
