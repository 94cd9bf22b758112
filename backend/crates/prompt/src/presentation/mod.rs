//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PromptAppState;
pub use router::{prompt_router, prompt_router_generic};
