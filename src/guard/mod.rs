//! Session timeout enforcement.
//!
//! [`SessionTimeoutGuard`] composes a [`SessionStore`], a resolved policy and
//! a [`Clock`]: it loads the session, asks the engine for a decision, then
//! deletes the session on expiry or saves the refreshed timestamps. Guards
//! are built per route at registration time, so the policy attached to a
//! handler is explicit rather than discovered.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use session_timeout::{
//!     DefaultPolicy, MemorySessionStore, SessionTimeoutGuard, SessionTimeoutSettings, TimeoutMode,
//! };
//!
//! let store = Arc::new(MemorySessionStore::new());
//! let settings = SessionTimeoutSettings::default()
//!     .with_mode(TimeoutMode::MaxLength)
//!     .with_timeout(3600);
//!
//! let guard = SessionTimeoutGuard::for_settings(store, &DefaultPolicy::default(), &settings)
//!     .expect("valid policy");
//! assert_eq!(guard.policy().timeout_secs, 3600);
//! ```

mod middleware;

pub use middleware::{session_timeout_middleware, with_session_timeout};

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::engine::{Evaluation, SessionTimeoutPolicyEngine};
use crate::policy::{DefaultPolicy, SessionTimeoutPolicy, SessionTimeoutSettings};
use crate::session::{SessionId, SessionState, SessionStore};
use crate::Result;

/// Result of checking a session against the guard's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session is live; carries the state as persisted after this access.
    Granted(SessionState),
    /// Session had timed out and has been deleted.
    Expired,
    /// No such session in the store.
    Unknown,
}

/// Interceptor that enforces one timeout policy.
pub struct SessionTimeoutGuard {
    store: Arc<dyn SessionStore>,
    policy: SessionTimeoutPolicy,
    clock: Arc<dyn Clock>,
}

impl SessionTimeoutGuard {
    /// Create a guard for an already resolved policy.
    pub fn new(store: Arc<dyn SessionStore>, policy: SessionTimeoutPolicy) -> Result<Self> {
        policy.ensure_evaluable()?;
        Ok(Self {
            store,
            policy,
            clock: Arc::new(SystemClock),
        })
    }

    /// Resolve a handler declaration and create a guard for it.
    pub fn for_settings(
        store: Arc<dyn SessionStore>,
        defaults: &DefaultPolicy,
        settings: &SessionTimeoutSettings,
    ) -> Result<Self> {
        Self::new(store, defaults.resolve(settings)?)
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> SessionTimeoutPolicy {
        self.policy
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Check one access to `id` and persist the outcome.
    pub fn check(&self, id: &SessionId) -> Result<Access> {
        let now = self.clock.now();

        let Some(state) = self.store.load(id)? else {
            tracing::warn!(session = %id, "unknown session");
            return Ok(Access::Unknown);
        };

        match SessionTimeoutPolicyEngine::evaluate(&self.policy, &state, now)? {
            Evaluation::Expired => {
                self.store.delete(id)?;
                tracing::info!(
                    session = %id,
                    mode = ?self.policy.mode,
                    created_at = state.created_at(),
                    last_accessed_at = state.last_accessed_at(),
                    now,
                    "session expired"
                );
                Ok(Access::Expired)
            }
            Evaluation::Active { state, updated } => {
                if updated {
                    self.store.save(id, state)?;
                    tracing::debug!(session = %id, last_accessed_at = now, "session refreshed");
                }
                Ok(Access::Granted(state))
            }
        }
    }
}

impl std::fmt::Debug for SessionTimeoutGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTimeoutGuard")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::policy::{SessionTimeoutMode, TimeoutMode};
    use crate::session::MemorySessionStore;

    fn setup(
        policy: SessionTimeoutPolicy,
    ) -> (Arc<MemorySessionStore>, Arc<ManualClock>, SessionTimeoutGuard) {
        let store = Arc::new(MemorySessionStore::new());
        let clock = Arc::new(ManualClock::new(0));
        let guard = SessionTimeoutGuard::new(store.clone(), policy)
            .unwrap()
            .with_clock(clock.clone());
        (store, clock, guard)
    }

    #[test]
    fn test_new_rejects_unresolved_policy() {
        let store = Arc::new(MemorySessionStore::new());
        let policy = SessionTimeoutPolicy {
            mode: SessionTimeoutMode::Default,
            timeout_secs: 60,
            update_interval_secs: 0,
        };
        assert!(SessionTimeoutGuard::new(store, policy).is_err());
    }

    #[test]
    fn test_for_settings_resolves() {
        let store = Arc::new(MemorySessionStore::new());
        let settings = SessionTimeoutSettings::default().with_mode(TimeoutMode::MaxLength);
        let guard =
            SessionTimeoutGuard::for_settings(store, &DefaultPolicy::default(), &settings).unwrap();

        assert_eq!(guard.policy().mode, SessionTimeoutMode::MaxLength);
        assert_eq!(guard.policy().timeout_secs, 1800);
    }

    #[test]
    fn test_store_is_shared_with_guard() {
        let (store, _, guard) = setup(SessionTimeoutPolicy::max_length(60));
        let id = store.create(5).unwrap();

        let seen = guard.store().load(&id).unwrap().unwrap();
        assert_eq!(seen.created_at(), 5);

        assert!(guard.store().delete(&id).unwrap());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_check_unknown() {
        let (_, _, guard) = setup(SessionTimeoutPolicy::last_accessed(1800, 300));
        assert_eq!(guard.check(&SessionId::from_raw(424242)).unwrap(), Access::Unknown);
    }

    #[test]
    fn test_check_throttles_updates() {
        let (store, clock, guard) = setup(SessionTimeoutPolicy::last_accessed(1800, 300));
        let id = store.create(0).unwrap();

        clock.set(200);
        assert!(matches!(guard.check(&id).unwrap(), Access::Granted(_)));
        assert_eq!(store.load(&id).unwrap().unwrap().last_accessed_at(), 0);

        clock.set(350);
        let access = guard.check(&id).unwrap();
        assert_eq!(access, Access::Granted(SessionState::new(0, 350).unwrap()));
        assert_eq!(store.load(&id).unwrap().unwrap().last_accessed_at(), 350);
    }

    #[test]
    fn test_check_sliding_keeps_session_alive() {
        let (store, clock, guard) = setup(SessionTimeoutPolicy::last_accessed(100, 0));
        let id = store.create(0).unwrap();

        for _ in 0..10 {
            clock.advance(90);
            assert!(matches!(guard.check(&id).unwrap(), Access::Granted(_)));
        }

        clock.advance(100);
        assert_eq!(guard.check(&id).unwrap(), Access::Expired);
    }

    #[test]
    fn test_check_expired_deletes() {
        let (store, clock, guard) = setup(SessionTimeoutPolicy::max_length(3600));
        let id = store.create(0).unwrap();

        clock.set(3000);
        assert!(matches!(guard.check(&id).unwrap(), Access::Granted(_)));

        clock.set(3600);
        assert_eq!(guard.check(&id).unwrap(), Access::Expired);
        assert!(store.load(&id).unwrap().is_none());
        assert_eq!(guard.check(&id).unwrap(), Access::Unknown);
    }
}
