//! # session-timeout
//!
//! Session timeout policies for web request handlers.
//!
//! A handler declares how its sessions age out: by absolute length from
//! creation, or by idle time since the last access. This crate resolves
//! those declarations against a process-wide default, decides expiry with
//! a pure engine, and enforces the result through an axum middleware.
//!
//! ## Features
//!
//! - **Pure engine**: [`SessionTimeoutPolicyEngine`] is deterministic over
//!   `(policy, state, now)` and performs no I/O
//! - **Throttled sliding expiry**: last-access updates are only persisted
//!   once per update interval
//! - **Explicit composition**: each route group gets its own
//!   [`SessionTimeoutGuard`], resolved at registration time
//!
//! ## Quick Start
//!
//! ```rust
//! use session_timeout::{SessionState, SessionTimeoutPolicy, SessionTimeoutPolicyEngine};
//!
//! let policy = SessionTimeoutPolicy::last_accessed(1800, 300);
//! let state = SessionState::started_at(0);
//!
//! assert!(!SessionTimeoutPolicyEngine::is_expired(&policy, &state, 350)?);
//! let next = SessionTimeoutPolicyEngine::advance(&policy, &state, 350);
//! assert_eq!(next.last_accessed_at(), 350);
//! # Ok::<(), session_timeout::SessionTimeoutError>(())
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod guard;
pub mod logging;
pub mod policy;
pub mod session;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Evaluation, SessionTimeoutPolicyEngine};
pub use error::{Result, SessionTimeoutError};
pub use guard::{session_timeout_middleware, with_session_timeout, Access, SessionTimeoutGuard};
pub use policy::{
    DefaultPolicy, SessionTimeoutMode, SessionTimeoutPolicy, SessionTimeoutSettings, TimeoutMode,
};
pub use session::{MemorySessionStore, SessionId, SessionState, SessionStore};
