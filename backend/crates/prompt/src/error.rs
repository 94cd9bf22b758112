//! Prompt Error Types
//!
//! This module provides prompt-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Prompt-specific result type alias
pub type PromptResult<T> = Result<T, PromptError>;

/// Prompt-specific error variants
#[derive(Debug, Error)]
pub enum PromptError {
    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Generation API key not configured
    #[error("Missing API key")]
    MissingApiKey,

    /// Transport failure talking to the generation API
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PromptError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PromptError::Validation(_) => StatusCode::BAD_REQUEST,
            PromptError::MissingApiKey | PromptError::Upstream(_) | PromptError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromptError::Validation(_) => ErrorKind::BadRequest,
            PromptError::MissingApiKey | PromptError::Upstream(_) | PromptError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError with a client-safe message
    ///
    /// Transport detail (target host, TLS, timeout cause) stays in the
    /// logs, never the body.
    pub fn to_app_error(&self) -> AppError {
        match self {
            PromptError::Upstream(_) => AppError::new(self.kind(), "Upstream request failed"),
            PromptError::Internal(_) => AppError::new(self.kind(), "Internal error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PromptError::MissingApiKey => {
                tracing::error!("Generation API key is not configured");
            }
            PromptError::Upstream(e) => {
                tracing::error!(error = %e, "Generation request failed");
            }
            PromptError::Internal(msg) => {
                tracing::error!(message = %msg, "Prompt internal error");
            }
            PromptError::Validation(_) => {
                tracing::debug!(error = %self, "Prompt error");
            }
        }
    }
}

impl IntoResponse for PromptError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
