//! Session bookkeeping.
//!
//! Each browser session owns exactly one [`RecordStore`]. Stores are created
//! on first use and dropped once their session has been idle for longer than
//! the configured timeout.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use uuid::Uuid;

use super::RecordStore;

/// A store shared between the registry and the request currently using it.
pub type SharedStore = Arc<Mutex<RecordStore>>;

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug)]
struct Session {
    store: SharedStore,
    last_seen: Instant,
}

/// Registry of live sessions and their stores.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Session>>,
    idle_timeout: Option<Duration>,
}

impl SessionRegistry {
    /// Create an empty registry.
    ///
    /// With `idle_timeout` set to `None`, sessions are never pruned.
    #[must_use]
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Get the store of a session, creating empty tables if the session has
    /// none yet.
    ///
    /// Calling this repeatedly for the same session never resets its data.
    pub fn init(&self, id: SessionId) -> SharedStore {
        self.init_at(id, Instant::now())
    }

    fn init_at(&self, id: SessionId, now: Instant) -> SharedStore {
        let mut sessions = self.lock();
        let session = sessions.entry(id).or_insert_with(|| {
            debug!(session = %id, "Created session store");
            Session {
                store: Arc::new(Mutex::new(RecordStore::new())),
                last_seen: now,
            }
        });
        session.last_seen = now;
        Arc::clone(&session.store)
    }

    /// Get the store of an existing session without creating one.
    ///
    /// A hit counts as activity and keeps the session from being pruned.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<SharedStore> {
        self.get_at(id, Instant::now())
    }

    fn get_at(&self, id: SessionId, now: Instant) -> Option<SharedStore> {
        self.lock().get_mut(&id).map(|session| {
            session.last_seen = now;
            Arc::clone(&session.store)
        })
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if there are no live sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The configured idle timeout.
    #[must_use]
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    /// Drop every session that has been idle longer than the timeout.
    ///
    /// Returns the number of sessions dropped.
    pub fn prune_idle(&self) -> usize {
        self.prune_idle_at(Instant::now())
    }

    fn prune_idle_at(&self, now: Instant) -> usize {
        let Some(timeout) = self.idle_timeout else {
            return 0;
        };

        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| now.saturating_duration_since(session.last_seen) <= timeout);
        let pruned = before - sessions.len();

        if pruned > 0 {
            info!("Pruned {} idle sessions", pruned);
        }
        pruned
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Lock a session store for one render pass.
///
/// A panic in an earlier pass cannot leave a table half-written, since every
/// append is a single push, so a poisoned lock is still safe to use.
pub(crate) fn lock_store(store: &SharedStore) -> MutexGuard<'_, RecordStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
