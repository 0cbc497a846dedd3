//! In-process session partitioning

use super::SessionState;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Handle to one session's state.
///
/// The mutex is held for the whole of a dispatch, so submissions from the
/// same session run one at a time.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Longest pause between two idle sweeps
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// All live sessions, keyed by the id carried in the session cookie.
///
/// A session not touched for `ttl` is dropped by [`SessionStore::evict_idle`].
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a live session and mark it as seen
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.handle.clone())
    }

    /// Look up `id`, or start a fresh empty session under a new id.
    ///
    /// Unknown ids are never adopted; the caller gets a server-issued one.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SessionHandle) {
        if let Some(id) = id {
            if let Some(handle) = self.get(id).await {
                return (id, handle);
            }
        }

        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(SessionState::new()));
        self.sessions.write().await.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(session = %id, "Session started");
        (id, handle)
    }

    /// Destroy a session. Returns false if it did not exist.
    pub async fn end(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(session = %id, "Session ended");
        }
        removed
    }

    /// Drop sessions idle for longer than the TTL as of `now`.
    ///
    /// A session whose state is locked (a search in flight) is kept.
    /// Returns the number of sessions removed.
    pub async fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.saturating_duration_since(entry.last_seen) <= self.ttl
                || entry.handle.try_lock().is_err()
        });
        before - sessions.len()
    }

    /// Run [`SessionStore::evict_idle`] periodically for the life of the process
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let period = store.ttl.clamp(Duration::from_millis(10), MAX_SWEEP_INTERVAL);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(Instant::now()).await;
                if evicted > 0 {
                    let active = store.len().await;
                    tracing::info!(evicted, active, "Idle sessions dropped");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
