//! Generate Use Case
//!
//! Relays a caller's prompt to the generation API.

use std::sync::Arc;

use crate::domain::generator::{Generation, TextGenerator};
use crate::error::PromptResult;

/// Generate input
pub struct GenerateInput {
    /// Authenticated caller, for the audit trail
    pub email: String,
    /// Prompt text
    pub text: String,
}

/// Generate use case
pub struct GenerateUseCase<G>
where
    G: TextGenerator,
{
    generator: Arc<G>,
}

impl<G> GenerateUseCase<G>
where
    G: TextGenerator,
{
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self, input: GenerateInput) -> PromptResult<Generation> {
        let generation = self.generator.generate(&input.text).await?;

        tracing::info!(
            email = %input.email,
            prompt_chars = input.text.chars().count(),
            upstream_status = generation.status,
            "Prompt relayed"
        );

        Ok(generation)
    }
}
