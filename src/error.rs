//! Error types for session-timeout.

use thiserror::Error;

/// Main error type for session-timeout operations.
#[derive(Error, Debug)]
pub enum SessionTimeoutError {
    /// Policy was not resolved or carries an unusable value.
    #[error("invalid session timeout policy: {0}")]
    InvalidPolicy(String),

    /// Session timestamps violate `last_accessed_at >= created_at`.
    #[error("invalid session state: access at {last_accessed_at} before creation at {created_at}")]
    InvalidSessionState {
        created_at: u64,
        last_accessed_at: u64,
    },

    /// Session with the given ID was not found.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// String is not a well-formed session ID.
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

impl SessionTimeoutError {
    pub(crate) fn invalid_policy(reason: impl Into<String>) -> Self {
        Self::InvalidPolicy(reason.into())
    }
}

/// Convenience Result type for session-timeout operations.
pub type Result<T> = std::result::Result<T, SessionTimeoutError>;
