//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management
//! - Client identification (IP extraction)
//! - Daily-rolling request/error file logging

pub mod client;
pub mod cookie;
pub mod logging;
pub mod password;
