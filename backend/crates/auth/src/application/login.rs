//! Login Use Case
//!
//! Authenticates a user and starts a session.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, session_token::SessionToken, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Session token for the cookie
    pub session_token: SessionToken,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Authenticate and rotate the session token
    ///
    /// Every failure short of a store error maps to `InvalidCredentials`
    /// so the response never reveals whether the email is registered.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Same normalization path as registration
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password) {
            return Err(AuthError::InvalidCredentials);
        }

        // Fresh token per login; storing it invalidates the previous one
        let token = SessionToken::generate();
        user.start_session(token.clone());
        self.user_repo.update_session(&user).await?;

        tracing::info!(email = %user.email, "User logged in");

        Ok(LoginOutput {
            session_token: token,
        })
    }
}
