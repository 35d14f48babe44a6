//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

/// Longest display name sent in a join request.
pub const DEFAULT_MAX_NAME_LEN: usize = 64;

/// Tunables for a [`GameSession`](super::session::GameSession).
///
/// Loadable from JSON; missing fields take their defaults.
///
/// ```
/// use tictactoe_session::SessionConfig;
/// use std::time::Duration;
///
/// let config = SessionConfig::from_json(r#"{"join_timeout_ms": 5000}"#).unwrap();
/// assert_eq!(config.join_timeout(), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Give up on a pending join after this many milliseconds.
    /// Off when unset.
    pub join_timeout_ms: Option<u64>,

    /// Display names are truncated to this many characters. At least 1.
    #[serde(deserialize_with = "at_least_one")]
    pub max_name_len: usize,
}

fn at_least_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    usize::deserialize(deserializer).map(|len| len.max(1))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            join_timeout_ms: None,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
        // Saturates; anything past u64::MAX ms is effectively forever.
        self.join_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = len.max(1);
        self
    }

    pub fn join_timeout(&self) -> Option<Duration> {
        self.join_timeout_ms.map(Duration::from_millis)
    }

    /// Trim and truncate a display name.
    pub fn normalize_name(&self, name: &str) -> String {
        name.trim().chars().take(self.max_name_len).collect()
    }
}
