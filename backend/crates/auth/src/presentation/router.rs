//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use consent::ConsentConfig;
use guard::GuardUtilities;

use crate::application::config::AuthConfig;
use crate::infra::browser_storage::BrowserStorageRegistry;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router
///
/// `consent` decides the attributes of the cookies written on sign-in.
pub fn auth_router(guard: Arc<GuardUtilities>, consent: ConsentConfig, config: AuthConfig) -> Router {
    let browsers = BrowserStorageRegistry::from_config(&config, guard.clock().clone());
    let state = AuthAppState {
        guard,
        browsers: Arc::new(browsers),
        consent: Arc::new(consent),
        config: Arc::new(config),
    };

    Router::new()
        .route("/sign-in", post(handlers::sign_in))
        .route("/sign-out", post(handlers::sign_out))
        .route("/me", get(handlers::me))
        .with_state(state)
}
