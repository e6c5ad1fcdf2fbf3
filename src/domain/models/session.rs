//! Credential and session models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A per-user OAuth access token.
///
/// Used both to authorize host calls and to scope cache entries. `Debug`
/// is redacted so the token cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Identity of the logged-in host user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub id: u64,
}

/// A logged-in session: who the user is and the token acting on their behalf.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: AccessToken,
    pub user: SessionUser,
}
