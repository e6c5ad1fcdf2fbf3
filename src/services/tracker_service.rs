//! Tracker service.
//!
//! Orchestrates the cache-then-fetch workflow for listing issues and the
//! serialize-post-normalize workflow for creating them.
//!
//! Concurrency model:
//! - Cache hits are served without taking any per-key lock.
//! - Fetch-and-cache-write and create-and-prepend for the same
//!   `(credential, owner, repo)` run under one per-key async mutex, so two
//!   refreshes never interleave their writes and a creation is never
//!   clobbered by an older fetch.
//! - A per-key mutex lives only while some request holds or awaits it.
//! - Pages are fetched strictly in order; each request starts after the
//!   previous one returns.
//! - The cache is written only after the last page arrives. If the caller
//!   drops the future (e.g. the HTTP client disconnects), no further pages
//!   are requested and nothing is cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument};

use crate::domain::errors::TrackerResult;
use crate::domain::models::{AccessToken, DomainIssue, NewIssue, RawIssue};
use crate::domain::ports::IssueHost;

use super::issue_cache::{CacheKey, IssueCache};
use super::issue_normalizer::{normalize, serialize};

/// Page size requested from the host's list endpoint.
pub const PAGE_SIZE: u32 = 100;

type KeyLocks = StdMutex<HashMap<CacheKey, Arc<Mutex<()>>>>;

pub struct TrackerService {
    host: Arc<dyn IssueHost>,
    cache: Arc<IssueCache>,
    /// Per-key mutexes currently held or awaited.
    key_locks: KeyLocks,
}

/// Exclusive hold on one cache key. Dropping it releases the mutex and
/// forgets the key once nobody else holds or awaits it.
struct KeyLease<'a> {
    locks: &'a KeyLocks,
    key: CacheKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyLease<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

impl TrackerService {
    pub fn new(host: Arc<dyn IssueHost>, cache: Arc<IssueCache>) -> Self {
        Self {
            host,
            cache,
            key_locks: StdMutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &Arc<IssueCache> {
        &self.cache
    }

    /// Number of keys with a live per-key mutex.
    pub fn locked_keys(&self) -> usize {
        self.key_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    async fn lock_key(&self, key: &CacheKey) -> KeyLease<'_> {
        let lock = {
            let mut locks = self.key_locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries left behind by requests cancelled while waiting.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        let guard = lock.lock_owned().await;

        KeyLease {
            locks: &self.key_locks,
            key: key.clone(),
            guard: Some(guard),
        }
    }

    /// List every issue in `owner/repo` visible to `credential`.
    ///
    /// Served from cache unless `force_refresh` is set or no entry exists.
    /// On a fetch, any page failure aborts the whole call and leaves the
    /// cache untouched.
    #[instrument(skip(self, credential))]
    pub async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        credential: &AccessToken,
        force_refresh: bool,
    ) -> TrackerResult<Vec<DomainIssue>> {
        let key = CacheKey::new(credential, owner, repo);

        if !force_refresh {
            if let Some(issues) = self.cache.get(&key).await {
                debug!(count = issues.len(), "issue cache hit");
                return Ok(issues);
            }
        }

        let _lease = self.lock_key(&key).await;

        // Another request may have filled the entry while we waited.
        if !force_refresh {
            if let Some(issues) = self.cache.get(&key).await {
                debug!(count = issues.len(), "issue cache filled while waiting");
                return Ok(issues);
            }
        }

        let raw = self.fetch_all(credential, owner, repo).await?;
        let issues: Vec<DomainIssue> = raw.into_iter().map(normalize).collect();

        self.cache.put(key, issues.clone()).await;
        info!(count = issues.len(), "issue cache refreshed");

        Ok(issues)
    }

    /// Page through the host until a short or empty page.
    async fn fetch_all(
        &self,
        credential: &AccessToken,
        owner: &str,
        repo: &str,
    ) -> TrackerResult<Vec<RawIssue>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let batch = self
                .host
                .list_issues_page(credential, owner, repo, page, PAGE_SIZE)
                .await?;
            let fetched = batch.len();
            debug!(page, fetched, "fetched issue page");

            all.extend(batch);
            if fetched < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// Create an issue in `owner/repo` on behalf of `credential`.
    ///
    /// Validation happens before any host call. On success the new issue is
    /// prepended to the cache entry if one exists; a missing entry is not
    /// an error.
    #[instrument(skip(self, credential, input))]
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        credential: &AccessToken,
        input: &NewIssue,
    ) -> TrackerResult<DomainIssue> {
        let payload = serialize(input)?;
        let key = CacheKey::new(credential, owner, repo);

        let _lease = self.lock_key(&key).await;

        let raw = self.host.create_issue(credential, owner, repo, &payload).await?;
        let issue = normalize(raw);

        let cached = self.cache.prepend(&key, issue.clone()).await;
        info!(number = issue.number, cached, "issue created");

        Ok(issue)
    }
}
