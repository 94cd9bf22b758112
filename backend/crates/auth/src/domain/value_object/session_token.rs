//! Session Token Value Object
//!
//! Random 128-bit bearer token proving a login session. A fresh token
//! is generated on every login and stored on the user record, which
//! replaces the previous one: each user has at most one live session.
//!
//! Tokens carry no expiry of their own. A token stays valid until the
//! next login overwrites it.

use std::fmt;

use uuid::Uuid;

/// Session token value object
///
/// The value is a bearer credential, so `Debug` output is redacted and
/// the raw string is only reachable through [`SessionToken::as_str`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token (UUID v4, 128 bits)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reconstruct from a cookie value
    ///
    /// Returns `None` for an empty value. Any other string is accepted
    /// and matched against stored tokens by equality.
    pub fn from_cookie(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_uuid_shaped() {
        let token = SessionToken::generate();
        assert_eq!(token.as_str().len(), 36);
        assert_eq!(token.as_str().matches('-').count(), 4);
    }

    #[test]
    fn test_generate_is_random() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_cookie_rejects_empty() {
        assert!(SessionToken::from_cookie("").is_none());
        assert!(SessionToken::from_cookie("abc").is_some());
    }

    #[test]
    fn test_debug_redaction() {
        let token = SessionToken::generate();
        let debug = format!("{:?}", token);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(token.as_str()));
    }
}
