//! Server-side session store.
//!
//! Maps opaque random session ids to typed [`Session`] records using a
//! moka TTL cache. The cookie only ever carries the id.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use crate::domain::models::{Session, SessionConfig};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Session store with a fixed time-to-live.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, Arc<Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store from configuration (default TTL: 14 days).
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_ttl(
            Duration::from_secs(u64::from(config.ttl_days) * SECONDS_PER_DAY),
            config.max_sessions,
        )
    }

    /// Create with custom TTL.
    pub fn with_ttl(ttl: Duration, max_sessions: u64) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_live(ttl)
            .build();

        Self { sessions, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a session and return its new id.
    pub async fn create(&self, session: Session) -> String {
        let id = Uuid::new_v4().simple().to_string();
        tracing::info!(login = %session.user.login, "session created");
        self.sessions.insert(id.clone(), Arc::new(session)).await;
        id
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.get(id).await
    }

    /// Remove a session. Unknown ids are ignored.
    pub async fn remove(&self, id: &str) {
        if let Some(session) = self.sessions.remove(id).await {
            tracing::info!(login = %session.user.login, "session removed");
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .field("entries", &self.sessions.entry_count())
            .finish()
    }
}
