//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use platform::client::{is_https, user_agent};
use platform::cookie::extract_cookie;

use crate::application::check_status::{CheckSecurityStatusUseCase, SecurityProbe};
use crate::application::guard::GuardUtilities;
use crate::presentation::dto::{
    EmailRequest, EmailResponse, PasswordStrengthRequest, PasswordStrengthResponse,
    SanitizeRequest, SanitizeResponse, SecurityStatusResponse,
};

/// Shared state for guard handlers
#[derive(Clone)]
pub struct GuardAppState {
    pub guard: Arc<GuardUtilities>,
}

/// Build a status probe from request headers
pub fn probe_from_headers(headers: &HeaderMap, session_cookie_name: &str) -> SecurityProbe {
    SecurityProbe {
        has_https: is_https(headers),
        session_token: extract_cookie(headers, session_cookie_name),
        user_agent: user_agent(headers).map(str::to_string),
    }
}

/// GET /api/security/status
pub async fn security_status(
    State(state): State<GuardAppState>,
    headers: HeaderMap,
) -> Json<SecurityStatusResponse> {
    let probe = probe_from_headers(&headers, &state.guard.config().session_cookie_name);
    let status = CheckSecurityStatusUseCase::new(state.guard.clone()).execute(&probe);

    if status.suspicious_activity {
        tracing::warn!(user_agent = ?probe.user_agent, "Automated client detected");
    }

    Json(status.into())
}

/// POST /api/security/password-strength
pub async fn password_strength(
    State(state): State<GuardAppState>,
    Json(req): Json<PasswordStrengthRequest>,
) -> Json<PasswordStrengthResponse> {
    let strength = state.guard.check_password_strength(&req.password);
    Json(PasswordStrengthResponse {
        ok: strength.ok,
        violations: strength.messages(),
    })
}

/// POST /api/security/email
pub async fn validate_email(
    State(state): State<GuardAppState>,
    Json(req): Json<EmailRequest>,
) -> Json<EmailResponse> {
    Json(EmailResponse {
        valid: state.guard.is_valid_email(&req.email),
    })
}

/// POST /api/security/sanitize
pub async fn sanitize(
    State(state): State<GuardAppState>,
    Json(req): Json<SanitizeRequest>,
) -> Json<SanitizeResponse> {
    Json(SanitizeResponse {
        sanitized: state.guard.sanitize(&req.input),
    })
}
