//! Service layer: the label codec, normalizer, cache and orchestration.

pub mod issue_cache;
pub mod issue_normalizer;
pub mod issue_sort;
pub mod label_codec;
pub mod session_store;
pub mod tracker_service;

pub use issue_cache::{CacheKey, IssueCache};
pub use issue_sort::{sort_issues, SortDirection, SortKey};
pub use session_store::SessionStore;
pub use tracker_service::{TrackerService, PAGE_SIZE};
