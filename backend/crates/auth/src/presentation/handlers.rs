//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, RegisterRequest};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /newUser
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // Any undecodable body reads as a plain 400
    let Json(req) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;

    let use_case = RegisterUseCase::new(state.repo.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
    };

    use_case.execute(input).await?;

    Ok((StatusCode::CREATED, "User registered"))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AuthError::Validation(e.body_text()))?;

    let use_case = LoginUseCase::new(state.repo.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    // Success - hand the fresh token to the browser
    let cookie = build_session_cookie(&state.config, output.session_token.as_str());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        "Login successful",
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn build_session_cookie(config: &AuthConfig, token: &str) -> String {
    config.cookie_config().build_set_cookie(token)
}
