//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guard::GuardError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::storage::StorageError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed validation after sanitizing
    #[error("Invalid email address")]
    InvalidEmail,

    /// Too many sign-in attempts from this browser
    #[error("Too many sign-in attempts")]
    RateLimited { reset_at_ms: i64 },

    /// No profile is stored for this browser
    #[error("Not signed in")]
    NotSignedIn,

    /// Client storage rejected the profile
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored profile could not be deobfuscated
    #[error("Stored profile could not be decoded: {0}")]
    Obfuscation(#[from] GuardError),

    /// Stored profile is not a profile record
    #[error("Stored profile is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidEmail => StatusCode::BAD_REQUEST,
            AuthError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::NotSignedIn => StatusCode::UNAUTHORIZED,
            AuthError::Storage(_) => StatusCode::INSUFFICIENT_STORAGE,
            AuthError::Obfuscation(_) | AuthError::Malformed(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmail => ErrorKind::InvalidInput,
            AuthError::RateLimited { .. } => ErrorKind::TooManyRequests,
            AuthError::NotSignedIn => ErrorKind::Unauthorized,
            AuthError::Storage(_) => ErrorKind::StorageFull,
            AuthError::Obfuscation(_) => ErrorKind::Decode,
            AuthError::Malformed(_) => ErrorKind::Parse,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::RateLimited { reset_at_ms } => {
                tracing::warn!(reset_at_ms, "Sign-in rate limit reached");
            }
            AuthError::Storage(e) => {
                tracing::warn!(error = %e, "Profile storage failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let app = AppError::new(kind, message);
        let app = match &err {
            AuthError::InvalidEmail => app.with_action("Enter an address like name@example.com"),
            AuthError::RateLimited { .. } => app.with_action("Wait a few minutes and try again"),
            AuthError::NotSignedIn => app.with_action("Sign in to continue"),
            _ => app,
        };
        app.with_source(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
