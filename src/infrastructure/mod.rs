//! Infrastructure layer module
//!
//! Cross-cutting plumbing that is not an adapter for a port:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
