//! Port for the host's OAuth and user-info endpoints.

use async_trait::async_trait;

use crate::domain::errors::TrackerResult;
use crate::domain::models::{AccessToken, SessionUser};

/// OAuth code exchange and authenticated-user lookup.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an authorization code for an access token.
    ///
    /// Fails with [`TrackerError::OAuth`](crate::domain::errors::TrackerError::OAuth),
    /// carrying the host's `error_description` when present.
    async fn exchange_code(&self, code: &str) -> TrackerResult<AccessToken>;

    /// Look up the user the token belongs to.
    ///
    /// Fails with [`TrackerError::Unauthorized`](crate::domain::errors::TrackerError::Unauthorized)
    /// when the host rejects the token.
    async fn fetch_user(&self, token: &AccessToken) -> TrackerResult<SessionUser>;
}
