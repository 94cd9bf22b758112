//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Prompt request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub text: String,
}
