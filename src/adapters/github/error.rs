//! Translation of GitHub responses and transport failures into [`TrackerError`].

use serde::Deserialize;

use crate::domain::errors::TrackerError;
use crate::infrastructure::logging::SecretScrubber;

/// GitHub's error body: `{"message": "...", "documentation_url": "..."}`.
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: Option<String>,
}

/// Classify a non-2xx response by status.
///
/// Only the `message` field of GitHub's JSON error object is kept (scrubbed).
/// Any other body, such as an HTML page from an intermediate proxy, is dropped.
pub fn translate_status(status: u16, body: &str) -> TrackerError {
    let message = serde_json::from_str::<GitHubErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| SecretScrubber::new().scrub(&m));

    TrackerError::from_status(status, message)
}

/// A request that never produced a response.
pub fn translate_transport(err: &reqwest::Error) -> TrackerError {
    let scrubbed = SecretScrubber::new().scrub(&err.to_string());
    if err.is_decode() {
        TrackerError::Internal(format!("Failed to decode GitHub response: {scrubbed}"))
    } else {
        TrackerError::Network(scrubbed)
    }
}
