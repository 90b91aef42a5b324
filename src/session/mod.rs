//! Session module.
//!
//! Session identification, recorded timestamps, and the storage seam the
//! timeout guard reads from and writes to.

mod id;
mod state;
mod store;

pub use id::SessionId;
pub use state::SessionState;
pub use store::{MemorySessionStore, SessionStore};
