//! Timeout modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionTimeoutError;

/// How a session's age is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionTimeoutMode {
    /// Absolute expiry, counted from session creation.
    MaxLength,
    /// Sliding expiry, counted from the last access.
    LastAccessed,
    /// Inherit the process-wide default. Must be resolved before evaluation.
    #[default]
    Default,
}

impl SessionTimeoutMode {
    /// Whether this mode can be evaluated directly.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionTimeoutMode::Default)
    }
}

/// Mode as written on a handler's timeout declaration.
///
/// Serialized as `MAX_LENGTH`, `LAST_ACCESSED` or `DEFAULT`. Converts to and
/// from [`SessionTimeoutMode`] without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeoutMode {
    MaxLength,
    LastAccessed,
    #[default]
    Default,
}

impl TimeoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeoutMode::MaxLength => "MAX_LENGTH",
            TimeoutMode::LastAccessed => "LAST_ACCESSED",
            TimeoutMode::Default => "DEFAULT",
        }
    }
}

impl From<TimeoutMode> for SessionTimeoutMode {
    fn from(mode: TimeoutMode) -> Self {
        match mode {
            TimeoutMode::MaxLength => SessionTimeoutMode::MaxLength,
            TimeoutMode::LastAccessed => SessionTimeoutMode::LastAccessed,
            TimeoutMode::Default => SessionTimeoutMode::Default,
        }
    }
}

impl From<SessionTimeoutMode> for TimeoutMode {
    fn from(mode: SessionTimeoutMode) -> Self {
        match mode {
            SessionTimeoutMode::MaxLength => TimeoutMode::MaxLength,
            SessionTimeoutMode::LastAccessed => TimeoutMode::LastAccessed,
            SessionTimeoutMode::Default => TimeoutMode::Default,
        }
    }
}

impl fmt::Display for TimeoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeoutMode {
    type Err = SessionTimeoutError;

    /// Accepts the declaration names case-insensitively, with `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MAX_LENGTH" => Ok(TimeoutMode::MaxLength),
            "LAST_ACCESSED" => Ok(TimeoutMode::LastAccessed),
            "DEFAULT" => Ok(TimeoutMode::Default),
            _ => Err(SessionTimeoutError::invalid_policy(format!(
                "unknown timeout mode: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_total_both_ways() {
        for mode in [
            TimeoutMode::MaxLength,
            TimeoutMode::LastAccessed,
            TimeoutMode::Default,
        ] {
            let internal: SessionTimeoutMode = mode.into();
            assert_eq!(TimeoutMode::from(internal), mode);
        }
    }

    #[test]
    fn test_is_resolved() {
        assert!(SessionTimeoutMode::MaxLength.is_resolved());
        assert!(SessionTimeoutMode::LastAccessed.is_resolved());
        assert!(!SessionTimeoutMode::Default.is_resolved());
    }

    #[test]
    fn test_parse() {
        assert_eq!("MAX_LENGTH".parse::<TimeoutMode>().unwrap(), TimeoutMode::MaxLength);
        assert_eq!(
            "last-accessed".parse::<TimeoutMode>().unwrap(),
            TimeoutMode::LastAccessed
        );
        assert_eq!("default".parse::<TimeoutMode>().unwrap(), TimeoutMode::Default);
        assert!("sliding".parse::<TimeoutMode>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TimeoutMode::LastAccessed).unwrap();
        assert_eq!(json, "\"LAST_ACCESSED\"");

        let mode: TimeoutMode = serde_json::from_str("\"MAX_LENGTH\"").unwrap();
        assert_eq!(mode, TimeoutMode::MaxLength);
    }
}
