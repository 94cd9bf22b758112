//! Application Configuration
//!
//! Configuration for the Prompt application layer.

use std::time::Duration;

/// Default generation endpoint (Gemini 2.0 Flash)
pub const DEFAULT_GENERATION_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Prompt application configuration
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Generation API endpoint
    pub endpoint: String,
    /// API key appended to the endpoint as a query parameter
    ///
    /// Checked per request, not at startup. A missing key surfaces as a
    /// 500 on the prompt route while the rest of the service keeps
    /// working.
    pub api_key: Option<String>,
    /// End-to-end timeout for one generation request
    pub request_timeout: Duration,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(180), // 3 minutes
        }
    }
}
