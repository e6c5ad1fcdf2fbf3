//! Domain errors for the tracker proxy.
//!
//! Every failure the proxy can report carries an explicit [`ErrorKind`].
//! The HTTP layer decodes the kind exactly once into a status code and a
//! `{error, message, details}` payload.

use serde_json::json;
use thiserror::Error;

/// Classification tag for a [`TrackerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required input was missing or malformed.
    Validation,
    /// No session, or the session's token was rejected during login.
    Unauthorized,
    /// The host answered 404.
    UpstreamNotFound,
    /// The host answered 401 or 403.
    UpstreamAuth,
    /// The host answered 429.
    UpstreamRateLimited,
    /// The host answered any other non-2xx status.
    UpstreamApi,
    /// The host could not be reached.
    Network,
    /// The OAuth code exchange failed.
    OAuth,
    /// Anything unclassified.
    Internal,
}

impl ErrorKind {
    /// Stable wire code used in the `error` field of failure payloads.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::Unauthorized => "unauthorized",
            Self::UpstreamNotFound => "upstream_not_found",
            Self::UpstreamAuth => "upstream_auth_error",
            Self::UpstreamRateLimited => "upstream_rate_limited",
            Self::UpstreamApi => "upstream_api_error",
            Self::Network => "network_error",
            Self::OAuth => "oauth_error",
            Self::Internal => "internal_error",
        }
    }
}

/// Errors produced by the label codec, the tracker service and the host adapters.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Resource not found")]
    UpstreamNotFound { message: Option<String> },

    #[error("Upstream authentication failed")]
    UpstreamAuth { status: u16, message: Option<String> },

    #[error("Upstream rate limit exceeded")]
    UpstreamRateLimited { message: Option<String> },

    #[error("Upstream API error")]
    UpstreamApi { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    OAuth(String),

    #[error("Internal server error")]
    Internal(String),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

impl TrackerError {
    /// Classify a non-2xx host status.
    ///
    /// - 404 → [`ErrorKind::UpstreamNotFound`]
    /// - 401, 403 → [`ErrorKind::UpstreamAuth`]
    /// - 429 → [`ErrorKind::UpstreamRateLimited`]
    /// - anything else → [`ErrorKind::UpstreamApi`], keeping the status
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            404 => Self::UpstreamNotFound { message },
            401 | 403 => Self::UpstreamAuth { status, message },
            429 => Self::UpstreamRateLimited { message },
            _ => Self::UpstreamApi { status, message },
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationFailed(_) => ErrorKind::Validation,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::UpstreamNotFound { .. } => ErrorKind::UpstreamNotFound,
            Self::UpstreamAuth { .. } => ErrorKind::UpstreamAuth,
            Self::UpstreamRateLimited { .. } => ErrorKind::UpstreamRateLimited,
            Self::UpstreamApi { .. } => ErrorKind::UpstreamApi,
            Self::Network(_) => ErrorKind::Network,
            Self::OAuth(_) => ErrorKind::OAuth,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status reported to the caller.
    ///
    /// Upstream kinds keep the host's status code.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::ValidationFailed(_) | Self::OAuth(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::UpstreamNotFound { .. } => 404,
            Self::UpstreamRateLimited { .. } => 429,
            Self::UpstreamAuth { status, .. } | Self::UpstreamApi { status, .. } => *status,
            Self::Network(_) => 502,
            Self::Internal(_) => 500,
        }
    }

    /// Extra structured context for the failure payload.
    ///
    /// Only upstream kinds carry details: the host status and, when the host
    /// supplied one, its (already scrubbed) message.
    pub fn details(&self) -> Option<serde_json::Value> {
        let (status, message) = match self {
            Self::UpstreamNotFound { message } => (404, message),
            Self::UpstreamRateLimited { message } => (429, message),
            Self::UpstreamAuth { status, message } | Self::UpstreamApi { status, message } => {
                (*status, message)
            }
            _ => return None,
        };

        Some(match message {
            Some(m) => json!({ "status": status, "upstream_message": m }),
            None => json!({ "status": status }),
        })
    }
}
