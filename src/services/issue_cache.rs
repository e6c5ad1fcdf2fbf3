//! Per-credential in-memory issue cache.
//!
//! Entries are keyed by `(credential, owner, repo)` and never expire; only
//! a forced refresh replaces them. Reads and writes go through an async
//! `RwLock`, so a reader never observes a half-written entry. Serializing
//! fetch-and-write per key is the tracker service's job.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::models::{AccessToken, DomainIssue};

/// Composite cache key.
///
/// Kept as a struct rather than a joined string so separator characters
/// inside tokens cannot make two keys collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub credential: AccessToken,
    pub owner: String,
    pub repo: String,
}

impl CacheKey {
    pub fn new(credential: &AccessToken, owner: &str, repo: &str) -> Self {
        Self {
            credential: credential.clone(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }
}

/// In-memory store of normalized issues.
#[derive(Debug, Default)]
pub struct IssueCache {
    entries: RwLock<HashMap<CacheKey, Vec<DomainIssue>>>,
}

impl IssueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry. No side effects.
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<DomainIssue>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Replace the entry for `key` with `issues`.
    pub async fn put(&self, key: CacheKey, issues: Vec<DomainIssue>) {
        self.entries.write().await.insert(key, issues);
    }

    /// Insert `issue` at the front of an existing entry.
    ///
    /// Returns `false` (and stores nothing) when there is no entry yet.
    pub async fn prepend(&self, key: &CacheKey, issue: DomainIssue) -> bool {
        match self.entries.write().await.get_mut(key) {
            Some(issues) => {
                issues.insert(0, issue);
                true
            }
            None => false,
        }
    }

    /// Number of cached keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
