//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        // Validate email
        let email = Email::new(input.email)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        // Check if email is taken
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Validate and hash password
        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let password_hash =
            UserPassword::from_raw(&raw_password).map_err(|e| AuthError::Internal(e.to_string()))?;

        // Create and persist user
        let user = User::new(email, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(email = %user.email, "User registered");

        Ok(RegisterOutput {
            email: user.email.to_string(),
        })
    }
}
