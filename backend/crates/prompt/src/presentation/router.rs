//! Prompt Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::domain::generator::TextGenerator;
use crate::infra::gemini::GeminiClient;
use crate::presentation::handlers::{self, PromptAppState};

/// Create the Prompt router with the Gemini client
pub fn prompt_router(generator: GeminiClient) -> Router {
    let state = PromptAppState {
        generator: Arc::new(generator),
    };

    Router::new()
        .route("/prompt", post(handlers::prompt::<GeminiClient>))
        .with_state(state)
}

/// Create a generic Prompt router for any generator implementation
pub fn prompt_router_generic<G>(generator: G) -> Router
where
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    let state = PromptAppState {
        generator: Arc::new(generator),
    };

    Router::new()
        .route("/prompt", post(handlers::prompt::<G>))
        .with_state(state)
}
