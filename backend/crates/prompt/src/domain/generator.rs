//! Text Generator Trait
//!
//! Interface to the upstream generation API. Implementation is in the
//! infrastructure layer.

use crate::error::PromptResult;

/// Raw upstream reply, relayed to the client as-is
#[derive(Debug, Clone)]
pub struct Generation {
    /// Upstream HTTP status
    pub status: u16,
    /// Upstream Content-Type, if any
    pub content_type: Option<String>,
    /// Upstream response body
    pub body: Vec<u8>,
}

/// Text generator trait
#[trait_variant::make(TextGenerator: Send)]
pub trait LocalTextGenerator {
    /// Submit prompt text and capture the upstream reply
    async fn generate(&self, text: &str) -> PromptResult<Generation>;
}
