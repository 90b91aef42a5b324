//! Resolution of handler declarations against the process-wide default.

use serde::{Deserialize, Serialize};

use super::{SessionTimeoutMode, SessionTimeoutPolicy, TimeoutMode};
use crate::error::SessionTimeoutError;
use crate::Result;

/// Sentinel meaning "inherit the default value".
pub const USE_DEFAULT: i64 = -1;

/// Timeout declaration attached to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionTimeoutSettings {
    pub mode: TimeoutMode,
    /// Seconds, or [`USE_DEFAULT`].
    pub session_timeout: i64,
    /// Seconds, or [`USE_DEFAULT`].
    pub last_accessed_update_interval: i64,
}

impl Default for SessionTimeoutSettings {
    fn default() -> Self {
        Self {
            mode: TimeoutMode::Default,
            session_timeout: USE_DEFAULT,
            last_accessed_update_interval: USE_DEFAULT,
        }
    }
}

impl SessionTimeoutSettings {
    pub fn with_mode(mut self, mode: TimeoutMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, secs: i64) -> Self {
        self.session_timeout = secs;
        self
    }

    pub fn with_update_interval(mut self, secs: i64) -> Self {
        self.last_accessed_update_interval = secs;
        self
    }
}

/// Process-wide default policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultPolicy {
    pub mode: SessionTimeoutMode,
    pub timeout_secs: u64,
    pub update_interval_secs: u64,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            mode: SessionTimeoutMode::LastAccessed,
            timeout_secs: 1800,
            update_interval_secs: 60,
        }
    }
}

impl DefaultPolicy {
    /// Validate the default itself.
    pub fn validate(&self) -> Result<()> {
        if !self.mode.is_resolved() {
            return Err(SessionTimeoutError::invalid_policy(
                "default mode cannot be DEFAULT",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(SessionTimeoutError::invalid_policy(
                "default timeout must be positive",
            ));
        }
        check_interval(self.update_interval_secs, self.timeout_secs)
    }

    /// The default as a policy.
    pub fn policy(&self) -> SessionTimeoutPolicy {
        SessionTimeoutPolicy {
            mode: self.mode,
            timeout_secs: self.timeout_secs,
            update_interval_secs: self.update_interval_secs,
        }
    }

    /// Resolve a handler declaration into a concrete policy.
    ///
    /// `DEFAULT` and `-1` take the default's value. Other negative numbers
    /// and a zero timeout are rejected. Under `LAST_ACCESSED` the update
    /// interval must be strictly below the timeout, otherwise a session
    /// could lapse between two persisted accesses.
    pub fn resolve(&self, settings: &SessionTimeoutSettings) -> Result<SessionTimeoutPolicy> {
        let mode = match SessionTimeoutMode::from(settings.mode) {
            SessionTimeoutMode::Default => self.mode,
            mode => mode,
        };
        if !mode.is_resolved() {
            return Err(SessionTimeoutError::invalid_policy(
                "default mode cannot be DEFAULT",
            ));
        }

        let timeout_secs = resolve_secs(
            settings.session_timeout,
            self.timeout_secs,
            "sessionTimeout",
        )?;
        if timeout_secs == 0 {
            return Err(SessionTimeoutError::invalid_policy(
                "sessionTimeout must be positive",
            ));
        }

        let update_interval_secs = resolve_secs(
            settings.last_accessed_update_interval,
            self.update_interval_secs,
            "lastAccessedUpdateInterval",
        )?;
        if mode == SessionTimeoutMode::LastAccessed {
            check_interval(update_interval_secs, timeout_secs)?;
        }

        Ok(SessionTimeoutPolicy {
            mode,
            timeout_secs,
            update_interval_secs,
        })
    }
}

fn resolve_secs(value: i64, default: u64, field: &str) -> Result<u64> {
    match value {
        USE_DEFAULT => Ok(default),
        v if v < 0 => Err(SessionTimeoutError::invalid_policy(format!(
            "{field} must be -1 or non-negative, got {v}"
        ))),
        v => Ok(v as u64),
    }
}

fn check_interval(interval: u64, timeout: u64) -> Result<()> {
    if interval >= timeout {
        return Err(SessionTimeoutError::invalid_policy(format!(
            "update interval ({interval}s) must be less than timeout ({timeout}s)"
        )));
    }
    Ok(())
}
