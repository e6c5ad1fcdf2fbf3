//! Domain models.

pub mod config;
pub mod issue;
pub mod label;
pub mod raw_issue;
pub mod session;

pub use config::{
    Config, GitHubConfig, LogFormat, LoggingConfig, RotationPolicy, ServerConfig, SessionConfig,
};
pub use issue::{DomainIssue, IssueState, NewIssue};
pub use label::LabelFields;
pub use raw_issue::{CreateIssuePayload, RawIssue, RawLabel, RawUser};
pub use session::{AccessToken, Session, SessionUser};
