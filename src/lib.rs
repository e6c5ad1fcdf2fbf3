//! Tracker Proxy - OAuth-backed GitHub issues backend
//!
//! Serves a single repository's issues to a browser frontend. Users log in
//! through the GitHub OAuth web flow; each request acts with the caller's
//! own token. Structured metadata (priority, type, client) lives in
//! prefixed labels and is decoded into first-class fields.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Issue models, error taxonomy and ports
//! - **Service Layer** (`services`): Label codec, normalizer, cache and orchestration
//! - **Adapters** (`adapters`): GitHub REST/OAuth clients and the axum HTTP surface
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ErrorKind, TrackerError, TrackerResult};
pub use domain::models::{Config, DomainIssue, LabelFields, NewIssue, RawIssue};
pub use domain::ports::{IdentityProvider, IssueHost};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{IssueCache, TrackerService};
