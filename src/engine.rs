//! Session timeout policy engine.
//!
//! Pure decisions over `(policy, state, now)`. The engine performs no I/O
//! and holds no state; persisting the returned [`SessionState`] is the
//! caller's job.

use crate::error::SessionTimeoutError;
use crate::policy::{SessionTimeoutMode, SessionTimeoutPolicy};
use crate::session::SessionState;
use crate::Result;

/// Outcome of evaluating one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// The session has timed out.
    Expired,
    /// The session is live. `updated` is set when `state` differs from the
    /// input and should be saved.
    Active { state: SessionState, updated: bool },
}

/// Stateless timeout engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionTimeoutPolicyEngine;

impl SessionTimeoutPolicyEngine {
    /// Whether the session has expired at `now`.
    ///
    /// Fails when the policy still has mode `Default` or a zero timeout.
    pub fn is_expired(
        policy: &SessionTimeoutPolicy,
        state: &SessionState,
        now: u64,
    ) -> Result<bool> {
        policy.ensure_evaluable()?;
        let elapsed = match policy.mode {
            SessionTimeoutMode::MaxLength => state.age(now),
            SessionTimeoutMode::LastAccessed => state.idle(now),
            SessionTimeoutMode::Default => {
                return Err(SessionTimeoutError::invalid_policy("unresolved mode"))
            }
        };
        Ok(elapsed >= policy.timeout_secs)
    }

    /// Whether this access should move `last_accessed_at` forward.
    ///
    /// Only sliding (`LastAccessed`) policies update, and only once the
    /// update interval has elapsed since the last persisted access.
    pub fn should_update_last_accessed(
        policy: &SessionTimeoutPolicy,
        state: &SessionState,
        now: u64,
    ) -> bool {
        policy.mode == SessionTimeoutMode::LastAccessed
            && (policy.update_interval_secs == 0
                || state.idle(now) >= policy.update_interval_secs)
    }

    /// The state to persist after a successful access.
    pub fn advance(policy: &SessionTimeoutPolicy, state: &SessionState, now: u64) -> SessionState {
        if Self::should_update_last_accessed(policy, state, now) {
            state.touched(now)
        } else {
            *state
        }
    }

    /// Expiry check and advance in one step.
    pub fn evaluate(
        policy: &SessionTimeoutPolicy,
        state: &SessionState,
        now: u64,
    ) -> Result<Evaluation> {
        if Self::is_expired(policy, state, now)? {
            return Ok(Evaluation::Expired);
        }
        let next = Self::advance(policy, state, now);
        Ok(Evaluation::Active {
            state: next,
            updated: next != *state,
        })
    }

    /// Unix second at which the session expires.
    pub fn expires_at(policy: &SessionTimeoutPolicy, state: &SessionState) -> Result<u64> {
        policy.ensure_evaluable()?;
        let base = match policy.mode {
            SessionTimeoutMode::MaxLength => state.created_at(),
            _ => state.last_accessed_at(),
        };
        Ok(base.saturating_add(policy.timeout_secs))
    }
}
