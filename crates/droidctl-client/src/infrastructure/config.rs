//! TOML-based configuration of controller timing.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock behaviour.  Example:
//!
//! ```toml
//! [channel]
//! drain_attempts = 10
//! drain_interval_ms = 20
//!
//! [clipboard]
//! response_timeout_ms = 1000
//! ack_timeout_ms = 1000
//!
//! [swipe]
//! unit = 5
//! duration_ms = 1000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use droidctl_core::DEFAULT_SWIPE_UNIT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level controller configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControllerConfig {
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub swipe: SwipeConfig,
}

/// Stale-data drain performed before every request/response exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Maximum number of bounded reads per drain.
    #[serde(default = "default_drain_attempts")]
    pub drain_attempts: u32,
    /// Timeout of each drain read in milliseconds.
    #[serde(default = "default_drain_interval_ms")]
    pub drain_interval_ms: u64,
}

/// Bounds on waiting for clipboard replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipboardConfig {
    /// How long get-clipboard waits for the device's reply.
    #[serde(default = "default_clipboard_timeout_ms")]
    pub response_timeout_ms: u64,
    /// How long set-clipboard waits for the acknowledgement.
    #[serde(default = "default_clipboard_timeout_ms")]
    pub ack_timeout_ms: u64,
}

/// Defaults applied to swipes that do not specify their own timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwipeConfig {
    /// Maximum per-axis movement between two touch-move events, in pixels.
    #[serde(default = "default_swipe_unit")]
    pub unit: u32,
    /// Total swipe duration in milliseconds.
    #[serde(default = "default_swipe_duration_ms")]
    pub duration_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_drain_attempts() -> u32 {
    10
}
fn default_drain_interval_ms() -> u64 {
    20
}
fn default_clipboard_timeout_ms() -> u64 {
    1000
}
fn default_swipe_unit() -> u32 {
    DEFAULT_SWIPE_UNIT
}
fn default_swipe_duration_ms() -> u64 {
    1000
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            drain_attempts: default_drain_attempts(),
            drain_interval_ms: default_drain_interval_ms(),
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            response_timeout_ms: default_clipboard_timeout_ms(),
            ack_timeout_ms: default_clipboard_timeout_ms(),
        }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            unit: default_swipe_unit(),
            duration_ms: default_swipe_duration_ms(),
        }
    }
}

impl ChannelConfig {
    pub fn drain_interval(&self) -> Duration {
        Duration::from_millis(self.drain_interval_ms)
    }
}

impl ClipboardConfig {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }
}

impl SwipeConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

// ── Loading and saving ────────────────────────────────────────────────────────

impl ControllerConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration to pretty-printed TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads the configuration at `path`, returning the defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system errors other than "not found",
    /// and [`ConfigError::Parse`] if the TOML is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drain_budget_is_ten_by_twenty_ms() {
        // Arrange / Act
        let cfg = ControllerConfig::default();

        // Assert
        assert_eq!(cfg.channel.drain_attempts, 10);
        assert_eq!(cfg.channel.drain_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_default_clipboard_timeouts_are_one_second() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.clipboard.response_timeout(), Duration::from_secs(1));
        assert_eq!(cfg.clipboard.ack_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_default_swipe_settings() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.swipe.unit, 5);
        assert_eq!(cfg.swipe.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg = ControllerConfig::from_toml_str("").expect("parse");
        assert_eq!(cfg, ControllerConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_missing_fields_with_defaults() {
        // Arrange
        let content = "[channel]\ndrain_attempts = 3\n\n[swipe]\nduration_ms = 250\n";

        // Act
        let cfg = ControllerConfig::from_toml_str(content).expect("parse");

        // Assert
        assert_eq!(cfg.channel.drain_attempts, 3);
        assert_eq!(cfg.channel.drain_interval_ms, 20);
        assert_eq!(cfg.swipe.duration_ms, 250);
        assert_eq!(cfg.swipe.unit, 5);
        assert_eq!(cfg.clipboard, ClipboardConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        // Arrange
        let mut cfg = ControllerConfig::default();
        cfg.clipboard.ack_timeout_ms = 250;
        cfg.swipe.unit = 12;

        // Act
        let text = cfg.to_toml_string().expect("serialize");
        let restored = ControllerConfig::from_toml_str(&text).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_malformed_toml_returns_parse_error() {
        let result = ControllerConfig::from_toml_str("[channel\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::env::temp_dir().join("droidctl-config-does-not-exist.toml");
        let cfg = ControllerConfig::load(&path).expect("missing file is not an error");
        assert_eq!(cfg, ControllerConfig::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("droidctl-config-{}", std::process::id()));
        let path = dir.join("controller.toml");
        let mut cfg = ControllerConfig::default();
        cfg.channel.drain_interval_ms = 5;

        // Act
        cfg.save(&path).expect("save");
        let loaded = ControllerConfig::load(&path).expect("load");
        let _ = std::fs::remove_dir_all(&dir);

        // Assert
        assert_eq!(loaded, cfg);
    }
}
