//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use consent::domain::cookie_names::SECURITY_TOKEN_COOKIE;
use consent::presentation::cookies::{SetCookieHeaders, request_cookie_manager, set_cookie_headers};
use consent::{ConsentConfig, CookieManager, MemoryCookieJar};
use guard::GuardUtilities;
use kernel::storage::MemoryStore;

use crate::application::config::AuthConfig;
use crate::application::session_store::SessionStore;
use crate::application::sign_in::SignInUseCase;
use crate::error::{AuthError, AuthResult};
use crate::infra::browser_storage::BrowserStorageRegistry;
use crate::presentation::dto::{ProfileResponse, SignInRequest};

type BrowserSession = SessionStore<MemoryStore, MemoryCookieJar>;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState {
    pub guard: Arc<GuardUtilities>,
    pub browsers: Arc<BrowserStorageRegistry>,
    pub consent: Arc<ConsentConfig>,
    pub config: Arc<AuthConfig>,
}

impl AuthAppState {
    /// Session store over this browser's cookies and client storage
    fn session(&self, headers: &HeaderMap) -> BrowserSession {
        let cookies =
            request_cookie_manager(headers, self.guard.clock().clone(), self.consent.clone());
        let browser_token = self.browser_token(&cookies);
        let storage = self.browsers.storage_for(&browser_token);
        SessionStore::new(storage, cookies, self.guard.clone(), self.config.clone())
    }

    /// The browser's `security_token`, minted on first contact
    fn browser_token(&self, cookies: &CookieManager<MemoryCookieJar>) -> String {
        if let Some(token) = cookies
            .get_secure_token(SECURITY_TOKEN_COOKIE)
            .filter(|token| self.guard.is_structurally_valid_token(token))
        {
            return token;
        }

        let token = self.guard.generate_random_token();
        cookies.set_secure_token(SECURITY_TOKEN_COOKIE, &token);
        tracing::debug!("Issued browser security token");
        token
    }
}

fn cookie_headers(session: &BrowserSession) -> SetCookieHeaders {
    set_cookie_headers(session.cookies().store())
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AuthAppState>,
    headers: HeaderMap,
    Json(req): Json<SignInRequest>,
) -> AuthResult<(SetCookieHeaders, Json<ProfileResponse>)> {
    let session = state.session(&headers);
    let use_case = SignInUseCase::new(state.guard.clone(), state.config.clone());

    let output = use_case.execute(&session, &req.email)?;

    Ok((cookie_headers(&session), Json(output.profile.into())))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/sign-out
pub async fn sign_out(
    State(state): State<AuthAppState>,
    headers: HeaderMap,
) -> (StatusCode, SetCookieHeaders) {
    let session = state.session(&headers);
    session.sign_out();
    (StatusCode::NO_CONTENT, cookie_headers(&session))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
pub async fn me(
    State(state): State<AuthAppState>,
    headers: HeaderMap,
) -> AuthResult<(SetCookieHeaders, Json<ProfileResponse>)> {
    let session = state.session(&headers);
    let profile = session.restore_on_load().ok_or(AuthError::NotSignedIn)?;
    Ok((cookie_headers(&session), Json(profile.into())))
}
