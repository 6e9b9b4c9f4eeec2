//! TOML-based configuration for the gesture dispatch host.
//!
//! Example file:
//!
//! ```toml
//! [engine]
//! debounce_interval_ms = 30
//! log_level = "info"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  This allows
//! the host to work correctly on first run (before a config file exists) and
//! when upgrading from an older config file that is missing newer fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gesture_queue::GestureQueueConfig;

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

/// Top-level host configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineSection,
}

/// Dispatch engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSection {
    /// Quiet period for scroll debouncing, in milliseconds.  `0` disables
    /// debouncing entirely.
    #[serde(default = "default_debounce_interval_ms")]
    pub debounce_interval_ms: u64,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            debounce_interval_ms: default_debounce_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

fn default_debounce_interval_ms() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Converts the on-disk settings into the engine's config struct.
    pub fn queue_config(&self) -> GestureQueueConfig {
        GestureQueueConfig {
            debounce_interval: Duration::from_millis(self.engine.debounce_interval_ms),
        }
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Loads the config from `path`.  A missing file yields the defaults so the
/// host works on first run.
pub fn load(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Writes the config to `path`, creating parent directories as needed.
pub fn save(path: &Path, config: &EngineConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
