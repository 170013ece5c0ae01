//! Guard Error Types
//!
//! Guard-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use std::string::FromUtf8Error;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Guard-specific result type alias
pub type GuardResult<T> = Result<T, GuardError>;

/// Guard-specific error variants
#[derive(Debug, Error)]
pub enum GuardError {
    /// Obfuscated value is not valid base64
    #[error("Obfuscated value is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded blob is shorter than the key id prefix
    #[error("Obfuscated value is too short")]
    Truncated,

    /// Blob was produced under a different obfuscation key
    #[error("Obfuscated value was produced by a different key")]
    KeyMismatch,

    /// Unmasked bytes are not UTF-8
    #[error("Deobfuscated value is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Obfuscation key material could not be parsed
    #[error("Invalid obfuscation key: {0}")]
    InvalidKey(String),
}

impl GuardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::Decode(_)
            | GuardError::Truncated
            | GuardError::KeyMismatch
            | GuardError::InvalidUtf8(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GuardError::InvalidKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuardError::Decode(_)
            | GuardError::Truncated
            | GuardError::KeyMismatch
            | GuardError::InvalidUtf8(_) => ErrorKind::Decode,
            GuardError::InvalidKey(_) => ErrorKind::Internal,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GuardError::InvalidKey(msg) => {
                tracing::error!(message = %msg, "Guard key error");
            }
            _ => {
                tracing::debug!(error = %self, "Guard decode error");
            }
        }
    }
}

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message).with_source(err)
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
