//! Structured fields carried by prefixed host labels.

use serde::{Deserialize, Serialize};

/// The three domain fields encoded in host labels as `P:`, `T:` and `C:`.
///
/// Each field is either a trimmed, non-empty string or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFields {
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub client: Option<String>,
}

impl LabelFields {
    pub fn new(
        priority: Option<String>,
        issue_type: Option<String>,
        client: Option<String>,
    ) -> Self {
        Self {
            priority,
            issue_type,
            client,
        }
    }

    /// True when none of the three fields is set.
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.issue_type.is_none() && self.client.is_none()
    }
}
