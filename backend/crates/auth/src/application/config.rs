//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session lifetime advertised to the browser via Max-Age
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Cookie path
    pub cookie_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_token".to_string(),
            session_ttl: Duration::from_secs(3600), // 1 hour
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            cookie_path: "/".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie settings for the session cookie
    ///
    /// Max-Age only tells the browser when to drop the cookie. Stored
    /// tokens are not expired server-side; a token stays valid until the
    /// next login replaces it.
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: self.cookie_path.clone(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}
