//! Application configuration.
//!
//! # Responsibility
//! - Hold the tunables shared by storage, view and controller layers.
//! - Parse host-provided JSON and reject unusable values up front.
//!
//! # Invariants
//! - A validated config always has a non-blank storage key, a non-zero
//!   notification TTL and a non-zero preview length.
//! - Missing JSON fields fall back to `AppConfig::default()`.

use crate::logging::{default_log_level, normalize_level};
use crate::storage::DEFAULT_STORAGE_KEY;
use crate::view::DEFAULT_PREVIEW_CHARS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3_000;
const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    BlankStorageKey,
    ZeroNotificationTtl,
    ZeroPreviewChars,
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::BlankStorageKey => write!(f, "storage_key must not be blank"),
            Self::ZeroNotificationTtl => write!(f, "notification_ttl_ms must be > 0"),
            Self::ZeroPreviewChars => write!(f, "preview_chars must be > 0"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Slot holding the serialized task list.
    pub storage_key: String,
    /// Auto-dismiss delay for notifications.
    pub notification_ttl_ms: u64,
    /// Description preview length in the list view.
    pub preview_chars: usize,
    /// Maximum serialized slot size; `None` disables the check.
    pub storage_quota_bytes: Option<usize>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` keeps logging off.
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            storage_quota_bytes: Some(DEFAULT_STORAGE_QUOTA_BYTES),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::BlankStorageKey);
        }
        if self.notification_ttl_ms == 0 {
            return Err(ConfigError::ZeroNotificationTtl);
        }
        if self.preview_chars == 0 {
            return Err(ConfigError::ZeroPreviewChars);
        }
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use std::time::Duration;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.storage_key, "todoTasks");
        assert_eq!(config.notification_ttl(), Duration::from_secs(3));
        assert_eq!(config.preview_chars, 100);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = AppConfig::from_json_str(r#"{"notification_ttl_ms": 500}"#)
            .expect("partial config should parse");
        assert_eq!(config.notification_ttl_ms, 500);
        assert_eq!(config.storage_key, "todoTasks");
    }

    #[test]
    fn rejects_unusable_values() {
        assert!(matches!(
            AppConfig::from_json_str(r#"{"storage_key": "  "}"#),
            Err(ConfigError::BlankStorageKey)
        ));
        assert!(matches!(
            AppConfig::from_json_str(r#"{"preview_chars": 0}"#),
            Err(ConfigError::ZeroPreviewChars)
        ));
        assert!(matches!(
            AppConfig::from_json_str(r#"{"log_level": "loud"}"#),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            AppConfig::from_json_str("[1,2]"),
            Err(ConfigError::Parse(_))
        ));
    }
}
