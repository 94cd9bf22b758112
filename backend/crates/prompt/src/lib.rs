//! Prompt (AI Proxy) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Generation contract
//! - `application/` - Use cases and configuration
//! - `infra/` - Gemini HTTP client
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Relays prompt text to the Gemini generateContent API
//! - Upstream status, Content-Type and body pass through untouched
//! - The server-side API key never reaches the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::PromptConfig;
pub use error::{PromptError, PromptResult};
pub use infra::gemini::GeminiClient;
pub use presentation::router::prompt_router;

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::generator::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
