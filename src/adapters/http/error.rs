//! Failure payloads.
//!
//! Every handler error funnels through [`ApiError`], which decodes the
//! [`TrackerError`] kind once into a status code and a
//! `{error, message, details?}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::domain::errors::TrackerError;

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// A [`TrackerError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub TrackerError);

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self(TrackerError::ValidationFailed(message.into()))
    }

    pub fn unauthorized() -> Self {
        Self(TrackerError::Unauthorized("Not authenticated".to_string()))
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.kind().code();

        if status.is_server_error() {
            match &err {
                TrackerError::Internal(detail) => {
                    tracing::error!(error = code, detail = %detail, "request failed");
                }
                other => tracing::error!(error = code, message = %other, "request failed"),
            }
        } else {
            tracing::warn!(error = code, status = status.as_u16(), message = %err, "request rejected");
        }

        let body = ErrorResponse {
            error: code,
            message: err.to_string(),
            details: err.details(),
        };
        (status, Json(body)).into_response()
    }
}
