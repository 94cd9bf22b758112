//! Gemini Client
//!
//! reqwest-backed implementation of the generation contract.

use std::sync::Arc;

use serde_json::json;

use crate::application::config::PromptConfig;
use crate::domain::generator::{Generation, TextGenerator};
use crate::error::{PromptError, PromptResult};

/// HTTP client for the Gemini generateContent API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: Arc<PromptConfig>,
}

impl GeminiClient {
    /// Build a client with the configured request timeout
    pub fn new(config: PromptConfig) -> PromptResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PromptError::Internal(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }
}

/// Wrap prompt text in the generateContent request shape
pub(crate) fn request_envelope(text: &str) -> serde_json::Value {
    json!({
        "contents": [
            {
                "parts": [
                    { "text": text }
                ]
            }
        ]
    })
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, text: &str) -> PromptResult<Generation> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(PromptError::MissingApiKey)?;

        // The API authenticates via a key query parameter
        let url = format!("{}?key={}", self.config.endpoint, api_key);

        let response = self
            .http
            .post(&url)
            .json(&request_envelope(text))
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response.bytes().await?.to_vec();

        Ok(Generation {
            status,
            content_type,
            body,
        })
    }
}
