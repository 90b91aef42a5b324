//! Per-session timestamps.

use serde::{Deserialize, Serialize};

use crate::error::SessionTimeoutError;

/// Recorded timestamps of a session, in Unix seconds.
///
/// Invariant: `last_accessed_at >= created_at`, also enforced when
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionState")]
pub struct SessionState {
    created_at: u64,
    last_accessed_at: u64,
}

/// Unchecked wire form of [`SessionState`].
#[derive(Deserialize)]
struct RawSessionState {
    created_at: u64,
    last_accessed_at: u64,
}

impl TryFrom<RawSessionState> for SessionState {
    type Error = SessionTimeoutError;

    fn try_from(raw: RawSessionState) -> Result<Self, Self::Error> {
        SessionState::new(raw.created_at, raw.last_accessed_at)
    }
}

impl SessionState {
    /// Create a state, rejecting a last access before creation.
    pub fn new(created_at: u64, last_accessed_at: u64) -> crate::Result<Self> {
        if last_accessed_at < created_at {
            return Err(SessionTimeoutError::InvalidSessionState {
                created_at,
                last_accessed_at,
            });
        }
        Ok(Self {
            created_at,
            last_accessed_at,
        })
    }

    /// State for a session created (and last accessed) at `now`.
    pub fn started_at(now: u64) -> Self {
        Self {
            created_at: now,
            last_accessed_at: now,
        }
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn last_accessed_at(&self) -> u64 {
        self.last_accessed_at
    }

    /// Copy with the last access moved to `at`. Never moves backwards.
    pub fn touched(&self, at: u64) -> Self {
        Self {
            created_at: self.created_at,
            last_accessed_at: self.last_accessed_at.max(at),
        }
    }

    /// Seconds since creation, zero if `now` is earlier.
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    /// Seconds since last access, zero if `now` is earlier.
    pub fn idle(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_accessed_at)
    }
}
