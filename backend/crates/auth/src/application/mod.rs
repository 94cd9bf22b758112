//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod login;
pub mod register;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
