//! Domain Layer
//!
//! Generation contract for the prompt module.

pub mod generator;

pub use generator::{Generation, TextGenerator};
