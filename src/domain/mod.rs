//! Domain layer for the tracker proxy
//!
//! Models, the error taxonomy and the port traits. Nothing here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ErrorKind, TrackerError, TrackerResult};
