//! Infrastructure Layer
//!
//! External service integrations.

pub mod gemini;

pub use gemini::GeminiClient;
