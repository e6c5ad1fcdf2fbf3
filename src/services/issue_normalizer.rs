//! Issue normalizer.
//!
//! Builds [`DomainIssue`]s from host payloads and serializes caller input
//! into host creation payloads. Both directions route labels through the
//! [`label_codec`](super::label_codec).

use crate::domain::errors::{TrackerError, TrackerResult};
use crate::domain::models::{CreateIssuePayload, DomainIssue, LabelFields, NewIssue, RawIssue};

use super::label_codec;

/// Project a raw host issue into the domain record.
///
/// Absent optional fields (body, labels, assignee) become absent or empty;
/// this never fails.
pub fn normalize(raw: RawIssue) -> DomainIssue {
    let labels = raw.label_names();
    let fields = label_codec::decode(&labels);

    DomainIssue {
        id: raw.id,
        number: raw.number,
        title: raw.title,
        body: raw.body,
        state: raw.state,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        labels,
        priority: fields.priority,
        issue_type: fields.issue_type,
        client: fields.client,
        assignee: raw.assignee.map(|a| a.login),
        url: raw.html_url,
    }
}

/// Serialize caller input into a host creation payload.
///
/// Fails with a validation error when the title is empty. The payload
/// never carries id, number, state or timestamps, and its labels are only
/// those encoded from priority, type and client.
pub fn serialize(input: &NewIssue) -> TrackerResult<CreateIssuePayload> {
    if input.title.is_empty() {
        return Err(TrackerError::ValidationFailed(
            "Issue title is required".to_string(),
        ));
    }

    let fields = LabelFields::new(
        input.priority.clone(),
        input.issue_type.clone(),
        input.client.clone(),
    );

    Ok(CreateIssuePayload {
        title: input.title.clone(),
        body: input.body.clone().unwrap_or_default(),
        assignees: input
            .assignee
            .iter()
            .filter(|a| !a.is_empty())
            .cloned()
            .collect(),
        labels: label_codec::encode(&fields),
    })
}
