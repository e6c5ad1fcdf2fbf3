//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stdout output
//! - Optional rolling JSON log files
//! - Secret scrubbing for upstream messages

pub mod logger;
pub mod secret_scrubbing;

pub use logger::Logger;
pub use secret_scrubbing::SecretScrubber;
