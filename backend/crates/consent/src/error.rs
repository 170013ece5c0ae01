//! Consent Error Types
//!
//! Consent-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::cookie::CookieError;
use thiserror::Error;

/// Consent-specific result type alias
pub type ConsentResult<T> = Result<T, ConsentError>;

/// Consent-specific error variants
#[derive(Debug, Error)]
pub enum ConsentError {
    /// Cookie value is not valid percent-encoding
    #[error("Consent cookie could not be decoded: {0}")]
    Decode(#[from] CookieError),

    /// Consent cookie holds something other than a preferences object
    #[error("Consent cookie is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ConsentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConsentError::Decode(_) | ConsentError::Malformed(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsentError::Decode(_) => ErrorKind::Decode,
            ConsentError::Malformed(_) => ErrorKind::Parse,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        tracing::warn!(error = %self, "Consent cookie rejected");
    }
}

impl From<ConsentError> for AppError {
    fn from(err: ConsentError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
            .with_action("Choose your cookie preferences again")
            .with_source(err)
    }
}

impl IntoResponse for ConsentError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
