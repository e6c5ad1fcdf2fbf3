//! Label codec.
//!
//! Maps between the host's flat label names and [`LabelFields`]. Labels
//! `P:<value>`, `T:<value>` and `C:<value>` carry priority, type and client.
//! Prefixes are case-sensitive; the value is trimmed, so `"P:High"` and
//! `"P: High"` decode identically.

use crate::domain::models::LabelFields;

/// Label prefix for priority.
pub const PRIORITY_PREFIX: &str = "P:";
/// Label prefix for issue type.
pub const TYPE_PREFIX: &str = "T:";
/// Label prefix for client.
pub const CLIENT_PREFIX: &str = "C:";

/// Decode label names into structured fields.
///
/// Scans in order. The first label with a given prefix wins; later labels
/// with the same prefix are ignored. A prefix followed only by whitespace
/// does not count as a match. Unprefixed labels are ignored here.
pub fn decode<S: AsRef<str>>(labels: &[S]) -> LabelFields {
    let mut fields = LabelFields::default();

    for label in labels {
        let label = label.as_ref();
        let (slot, rest) = if let Some(rest) = label.strip_prefix(PRIORITY_PREFIX) {
            (&mut fields.priority, rest)
        } else if let Some(rest) = label.strip_prefix(TYPE_PREFIX) {
            (&mut fields.issue_type, rest)
        } else if let Some(rest) = label.strip_prefix(CLIENT_PREFIX) {
            (&mut fields.client, rest)
        } else {
            continue;
        };

        let value = rest.trim();
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }

    fields
}

/// Encode structured fields as label names.
///
/// Emits `"<Prefix> <value>"` for each present, non-empty field, in the
/// order priority, type, client. Nothing else is emitted.
pub fn encode(fields: &LabelFields) -> Vec<String> {
    [
        (PRIORITY_PREFIX, &fields.priority),
        (TYPE_PREFIX, &fields.issue_type),
        (CLIENT_PREFIX, &fields.client),
    ]
    .into_iter()
    .filter_map(|(prefix, value)| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| format!("{prefix} {v}"))
    })
    .collect()
}
