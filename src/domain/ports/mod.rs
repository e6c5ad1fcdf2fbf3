//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that infrastructure adapters must implement:
//! - IssueHost: the host's issue list/create endpoints
//! - IdentityProvider: OAuth code exchange and user lookup

pub mod identity_provider;
pub mod issue_host;

pub use identity_provider::IdentityProvider;
pub use issue_host::IssueHost;
