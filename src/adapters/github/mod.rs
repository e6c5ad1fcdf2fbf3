//! GitHub adapter.
//!
//! Implements the [`IssueHost`](crate::domain::ports::IssueHost) and
//! [`IdentityProvider`](crate::domain::ports::IdentityProvider) ports over
//! the GitHub REST API v3 and the OAuth web flow.

pub mod client;
pub mod error;
pub mod oauth;

pub use client::GitHubClient;
pub use oauth::GitHubOAuth;
