//! Guard Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::guard::GuardUtilities;
use crate::presentation::handlers::{self, GuardAppState};

/// Create the security router (mounted under `/api/security`)
pub fn guard_router(guard: Arc<GuardUtilities>) -> Router {
    let state = GuardAppState { guard };

    Router::new()
        .route("/status", get(handlers::security_status))
        .route("/password-strength", post(handlers::password_strength))
        .route("/email", post(handlers::validate_email))
        .route("/sanitize", post(handlers::sanitize))
        .with_state(state)
}
