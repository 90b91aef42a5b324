//! Session identifiers.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SessionTimeoutError;

const PREFIX: &str = "sess-";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque session identifier, unique within the process.
///
/// Rendered as `sess-XXXXXXXX` (lowercase hex). The middleware expects an
/// upstream layer to decode it from the request and insert it as an
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocate a fresh id.
    pub fn generate() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{:08x}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = SessionTimeoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(PREFIX)
            .filter(|hex| !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u64::from_str_radix(hex, 16).ok())
            .map(SessionId)
            .ok_or_else(|| SessionTimeoutError::InvalidSessionId(s.into()))
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_unique() {
        let ids: HashSet<_> = (0..1_000).map(|_| SessionId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionId::from_raw(255).to_string(), "sess-000000ff");
    }

    #[test]
    fn test_parse() {
        let id: SessionId = "sess-0000002a".parse().unwrap();
        assert_eq!(id.as_u64(), 42);

        assert!("0000002a".parse::<SessionId>().is_err());
        assert!("sess-".parse::<SessionId>().is_err());
        assert!("sess-zz".parse::<SessionId>().is_err());
        assert!("sess-+1".parse::<SessionId>().is_err());
        assert!("sess--1".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_parse_error_is_invalid_id() {
        let err = "sess-+1".parse::<SessionId>().unwrap_err();
        assert!(matches!(err, SessionTimeoutError::InvalidSessionId(ref s) if s == "sess-+1"));
    }

    #[test]
    fn test_serde_as_string() {
        let id = SessionId::from_raw(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"sess-00000007\"");

        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<SessionId>("\"bogus\"").is_err());
    }
}
