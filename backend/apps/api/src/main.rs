//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::auth_router;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use consent::consent_router;
use guard::{GuardUtilities, guard_router};
use kernel::clock::SystemClock;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,consent=info,guard=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // One guard per process; a fresh key unless one is configured
    let guard = Arc::new(match config.obfuscation_key {
        Some(key) => {
            tracing::info!("Using configured obfuscation key");
            GuardUtilities::with_key(key, SystemClock::shared(), config.guard)
        }
        None => GuardUtilities::new(config.guard),
    });

    let app = build_router(guard, config.consent, config.auth, config.frontend_origins);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

fn build_router(
    guard: Arc<GuardUtilities>,
    consent: consent::ConsentConfig,
    auth: auth::AuthConfig,
    frontend_origins: Vec<HeaderValue>,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(frontend_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    Router::new()
        .nest("/api/security", guard_router(guard.clone()))
        .nest(
            "/api/consent",
            consent_router(guard.clock().clone(), consent.clone()),
        )
        .nest("/api/auth", auth_router(guard, consent, auth))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
