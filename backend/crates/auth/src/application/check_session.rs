//! Check Session Use Case
//!
//! Resolves a session token to the user holding it.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Look up the user whose stored token matches
    ///
    /// A token that matches no user is invalid, whether it was never
    /// issued or was replaced by a later login.
    pub async fn execute(&self, token: &SessionToken) -> AuthResult<User> {
        self.user_repo
            .find_by_session_token(token)
            .await?
            .ok_or(AuthError::SessionInvalid)
    }
}
