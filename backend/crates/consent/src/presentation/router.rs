//! Consent Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use kernel::clock::SharedClock;

use crate::application::config::ConsentConfig;
use crate::presentation::handlers::{self, ConsentAppState};

/// Create the consent router (mounted under `/api/consent`)
pub fn consent_router(clock: SharedClock, config: ConsentConfig) -> Router {
    let state = ConsentAppState {
        clock,
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::get_consent)
                .put(handlers::save_preferences)
                .delete(handlers::revoke),
        )
        .route("/categories", get(handlers::categories))
        .route("/accept-all", post(handlers::accept_all))
        .route("/reject-all", post(handlers::reject_all))
        .with_state(state)
}
