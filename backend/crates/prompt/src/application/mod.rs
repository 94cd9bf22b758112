//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod generate;

// Re-exports
pub use config::PromptConfig;
pub use generate::{GenerateInput, GenerateUseCase};
