//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use kernel::clock::SharedClock;

use crate::application::config::ConsentConfig;
use crate::application::cookie_manager::CookieManager;
use crate::domain::category::{CategoryInfo, cookie_categories};
use crate::domain::choice::{ConsentChoice, ConsentState};
use crate::domain::preferences::ConsentPreferences;
use crate::infra::memory_jar::MemoryCookieJar;
use crate::presentation::cookies::{SetCookieHeaders, request_cookie_manager, set_cookie_headers};
use crate::presentation::dto::{ConsentStatusResponse, RevokeResponse};

/// Shared state for consent handlers
#[derive(Clone)]
pub struct ConsentAppState {
    pub clock: SharedClock,
    pub config: Arc<ConsentConfig>,
}

impl ConsentAppState {
    fn manager(&self, headers: &HeaderMap) -> CookieManager<MemoryCookieJar> {
        request_cookie_manager(headers, self.clock.clone(), self.config.clone())
    }
}

/// GET /api/consent
pub async fn get_consent(
    State(state): State<ConsentAppState>,
    headers: HeaderMap,
) -> Json<ConsentStatusResponse> {
    Json(state.manager(&headers).consent_state().into())
}

/// GET /api/consent/categories
pub async fn categories() -> Json<Vec<CategoryInfo>> {
    Json(cookie_categories())
}

/// PUT /api/consent
pub async fn save_preferences(
    State(state): State<ConsentAppState>,
    headers: HeaderMap,
    Json(preferences): Json<ConsentPreferences>,
) -> (SetCookieHeaders, Json<ConsentStatusResponse>) {
    apply(&state, &headers, ConsentChoice::Custom(preferences))
}

/// POST /api/consent/accept-all
pub async fn accept_all(
    State(state): State<ConsentAppState>,
    headers: HeaderMap,
) -> (SetCookieHeaders, Json<ConsentStatusResponse>) {
    apply(&state, &headers, ConsentChoice::AcceptAll)
}

/// POST /api/consent/reject-all
pub async fn reject_all(
    State(state): State<ConsentAppState>,
    headers: HeaderMap,
) -> (SetCookieHeaders, Json<ConsentStatusResponse>) {
    apply(&state, &headers, ConsentChoice::RejectAll)
}

/// DELETE /api/consent
pub async fn revoke(
    State(state): State<ConsentAppState>,
    headers: HeaderMap,
) -> (StatusCode, SetCookieHeaders, Json<RevokeResponse>) {
    let manager = state.manager(&headers);
    let removed = manager.revoke_consent();
    (
        StatusCode::OK,
        set_cookie_headers(manager.store()),
        Json(RevokeResponse { removed }),
    )
}

fn apply(
    state: &ConsentAppState,
    headers: &HeaderMap,
    choice: ConsentChoice,
) -> (SetCookieHeaders, Json<ConsentStatusResponse>) {
    let manager = state.manager(headers);
    let preferences = manager.apply_choice(choice);
    (
        set_cookie_headers(manager.store()),
        Json(ConsentState::Decided(preferences).into()),
    )
}
