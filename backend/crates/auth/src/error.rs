//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered
    #[error("Email already in use")]
    EmailTaken,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session cookie absent or empty
    #[error("No session token")]
    SessionMissing,

    /// Session cookie present but matches no stored token
    #[error("Invalid session")]
    SessionInvalid,

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::EmailTaken | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::SessionMissing
            | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::SessionMissing
            | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with a client-safe message
    ///
    /// Server-side variants carry driver/internal detail in their
    /// Display form; that detail goes to logs only, never the body.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) => AppError::new(self.kind(), "Database error"),
            AuthError::Internal(_) => AppError::new(self.kind(), "Internal error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            // Let the kernel classify driver errors (e.g. pool exhaustion -> 503)
            AuthError::Database(e) => AppError::from(e).into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}
