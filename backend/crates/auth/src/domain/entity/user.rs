//! User Entity
//!
//! Account record: identity (email), credential hash, and the single
//! active session token.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, session_token::SessionToken, user_password::UserPassword,
};

/// User entity
///
/// The email is the identity; there is no separate user id. A user
/// holds at most one session token, replaced wholesale on each login.
#[derive(Debug, Clone)]
pub struct User {
    /// Email address (unique, stored exactly as registered)
    pub email: Email,
    /// Argon2id password hash (PHC string)
    pub password_hash: UserPassword,
    /// Current session token, if any
    pub session_token: Option<SessionToken>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no active session
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            email,
            password_hash,
            session_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Start a session, replacing any previous token
    ///
    /// The replaced token stops matching lookups immediately, which is
    /// what limits a user to one active session.
    pub fn start_session(&mut self, token: SessionToken) {
        self.session_token = Some(token);
        self.updated_at = Utc::now();
    }
}
