//! Sorting for issue listings.
//!
//! Applied to a response copy only; the cache keeps host order.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::domain::models::DomainIssue;

/// Field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Priority,
    Client,
    Title,
    Number,
    #[serde(rename = "type")]
    Type,
    State,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Rank of a priority value: low < medium < high. Unknown values rank as absent.
fn priority_rank(priority: Option<&str>) -> Option<u8> {
    match priority?.to_lowercase().as_str() {
        "low" => Some(0),
        "medium" => Some(1),
        "high" => Some(2),
        _ => None,
    }
}

/// Compare two optional values, putting absent ones last in either direction.
fn compare_present<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(&b),
            SortDirection::Desc => b.cmp(&a),
        },
    }
}

/// Stable-sort `issues` in place.
pub fn sort_issues(issues: &mut [DomainIssue], key: SortKey, direction: SortDirection) {
    issues.sort_by(|a, b| match key {
        SortKey::CreatedAt => compare_present(Some(a.created_at), Some(b.created_at), direction),
        SortKey::UpdatedAt => compare_present(Some(a.updated_at), Some(b.updated_at), direction),
        SortKey::Priority => compare_present(
            priority_rank(a.priority.as_deref()),
            priority_rank(b.priority.as_deref()),
            direction,
        ),
        SortKey::Client => compare_present(a.client.as_deref(), b.client.as_deref(), direction),
        SortKey::Title => compare_present(Some(&a.title), Some(&b.title), direction),
        SortKey::Number => compare_present(Some(a.number), Some(b.number), direction),
        SortKey::Type => {
            compare_present(a.issue_type.as_deref(), b.issue_type.as_deref(), direction)
        }
        SortKey::State => {
            compare_present(Some(a.state.as_str()), Some(b.state.as_str()), direction)
        }
    });
}
