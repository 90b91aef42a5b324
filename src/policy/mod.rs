//! Session timeout policies.
//!
//! A handler declares its timeout with [`SessionTimeoutSettings`], where the
//! mode may be `DEFAULT` and either number may be `-1`. [`DefaultPolicy::resolve`]
//! fills those in from the process-wide default and yields a concrete
//! [`SessionTimeoutPolicy`], which is the only form the engine accepts.

mod mode;
mod resolve;

pub use mode::{SessionTimeoutMode, TimeoutMode};
pub use resolve::{DefaultPolicy, SessionTimeoutSettings, USE_DEFAULT};

use crate::error::SessionTimeoutError;
use crate::Result;

/// A resolved timeout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimeoutPolicy {
    pub mode: SessionTimeoutMode,
    /// Session lifetime in seconds. Always positive once resolved.
    pub timeout_secs: u64,
    /// Minimum spacing between persisted `last_accessed_at` updates.
    /// Zero means every access is persisted.
    pub update_interval_secs: u64,
}

impl SessionTimeoutPolicy {
    pub fn max_length(timeout_secs: u64) -> Self {
        Self {
            mode: SessionTimeoutMode::MaxLength,
            timeout_secs,
            update_interval_secs: 0,
        }
    }

    pub fn last_accessed(timeout_secs: u64, update_interval_secs: u64) -> Self {
        Self {
            mode: SessionTimeoutMode::LastAccessed,
            timeout_secs,
            update_interval_secs,
        }
    }

    /// Check that the policy can be evaluated.
    pub fn ensure_evaluable(&self) -> Result<()> {
        if !self.mode.is_resolved() {
            return Err(SessionTimeoutError::invalid_policy(
                "mode DEFAULT must be resolved before evaluation",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(SessionTimeoutError::invalid_policy(
                "timeout must be positive",
            ));
        }
        Ok(())
    }
}
