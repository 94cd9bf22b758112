//! Auth Gate Middleware
//!
//! Middleware for requiring a valid session on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid session
///
/// Matches the cookie token against stored tokens and attaches the
/// holder's identity to the request. Handlers behind this gate never
/// run for an unauthenticated request.
pub async fn require_session<R>(
    State(state): State<AuthGateState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    // A cookie with an empty value reads the same as no cookie
    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name)
        .and_then(|raw| SessionToken::from_cookie(&raw))
        .ok_or_else(|| AuthError::SessionMissing.into_response())?;

    let use_case = CheckSessionUseCase::new(state.repo.clone());

    let user = use_case
        .execute(&token)
        .await
        .map_err(|e| e.into_response())?;

    // Hand the identity to downstream handlers
    req.extensions_mut().insert(CurrentUser {
        email: user.email.to_string(),
    });

    Ok(next.run(req).await)
}
