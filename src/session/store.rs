//! Session storage.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{SessionId, SessionState};
use crate::engine::SessionTimeoutPolicyEngine;
use crate::error::SessionTimeoutError;
use crate::policy::SessionTimeoutPolicy;
use crate::Result;

/// Backend that owns session timestamps.
///
/// The timeout engine only proposes new states; implementations decide how
/// to persist them. Concurrent saves for one session are last-write-wins.
pub trait SessionStore: Send + Sync {
    /// Load a session, `None` if it does not exist.
    fn load(&self, id: &SessionId) -> Result<Option<SessionState>>;

    /// Insert or overwrite a session.
    fn save(&self, id: &SessionId, state: SessionState) -> Result<()>;

    /// Delete a session. Returns whether it existed.
    fn delete(&self, id: &SessionId) -> Result<bool>;
}

/// Thread-safe in-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session at `now` and return its id.
    pub fn create(&self, now: u64) -> Result<SessionId> {
        let id = SessionId::generate();
        self.save(&id, SessionState::started_at(now))?;
        Ok(id)
    }

    /// Number of stored sessions.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn list_ids(&self) -> Result<Vec<SessionId>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| SessionTimeoutError::LockPoisoned)?;
        Ok(sessions.keys().copied().collect())
    }

    /// Remove all sessions matching a predicate.
    ///
    /// Returns the number of sessions removed.
    pub fn remove_matching<F>(&self, predicate: F) -> Result<usize>
    where
        F: Fn(&SessionId, &SessionState) -> bool,
    {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionTimeoutError::LockPoisoned)?;

        let before = sessions.len();
        sessions.retain(|id, state| !predicate(id, state));
        Ok(before - sessions.len())
    }

    /// Drop every session that has expired under `policy` at `now`.
    pub fn purge_expired(&self, policy: &SessionTimeoutPolicy, now: u64) -> Result<usize> {
        policy.ensure_evaluable()?;
        let removed = self.remove_matching(|_, state| {
            SessionTimeoutPolicyEngine::is_expired(policy, state, now).unwrap_or(false)
        })?;
        if removed > 0 {
            tracing::info!(removed, "purged expired sessions");
        }
        Ok(removed)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<SessionState>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| SessionTimeoutError::LockPoisoned)?;
        Ok(sessions.get(id).copied())
    }

    fn save(&self, id: &SessionId, state: SessionState) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionTimeoutError::LockPoisoned)?;
        sessions.insert(*id, state);
        Ok(())
    }

    fn delete(&self, id: &SessionId) -> Result<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionTimeoutError::LockPoisoned)?;
        Ok(sessions.remove(id).is_some())
    }
}
