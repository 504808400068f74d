//! Application configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Pacing of the timed transitions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Timings {
    /// Shortest wheel spin.
    #[serde(default = "default_spin_min_ms")]
    spin_min_ms: u64,

    /// Longest wheel spin.
    #[serde(default = "default_spin_max_ms")]
    spin_max_ms: u64,

    /// Extra wait after the wheel stops before the result is revealed.
    #[serde(default = "default_spin_settle_ms")]
    spin_settle_ms: u64,

    /// How long the revealed result stays up before the game screen.
    #[serde(default = "default_reveal_pause_ms")]
    reveal_pause_ms: u64,

    /// How long a won or drawn board stays up before the reset.
    #[serde(default = "default_game_end_pause_ms")]
    game_end_pause_ms: u64,
}

fn default_spin_min_ms() -> u64 {
    4_000
}

fn default_spin_max_ms() -> u64 {
    7_000
}

fn default_spin_settle_ms() -> u64 {
    100
}

fn default_reveal_pause_ms() -> u64 {
    1_500
}

fn default_game_end_pause_ms() -> u64 {
    3_000
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            spin_min_ms: default_spin_min_ms(),
            spin_max_ms: default_spin_max_ms(),
            spin_settle_ms: default_spin_settle_ms(),
            reveal_pause_ms: default_reveal_pause_ms(),
            game_end_pause_ms: default_game_end_pause_ms(),
        }
    }
}

impl Timings {
    /// Creates timings from explicit millisecond values.
    pub fn new(
        spin_min_ms: u64,
        spin_max_ms: u64,
        spin_settle_ms: u64,
        reveal_pause_ms: u64,
        game_end_pause_ms: u64,
    ) -> Self {
        Self {
            spin_min_ms,
            spin_max_ms,
            spin_settle_ms,
            reveal_pause_ms,
            game_end_pause_ms,
        }
    }

    /// Shortest wheel spin.
    pub fn spin_min(&self) -> Duration {
        Duration::from_millis(self.spin_min_ms)
    }

    /// Longest wheel spin.
    pub fn spin_max(&self) -> Duration {
        Duration::from_millis(self.spin_max_ms)
    }

    /// Wait after the wheel stops.
    pub fn spin_settle(&self) -> Duration {
        Duration::from_millis(self.spin_settle_ms)
    }

    /// Result display before the game screen.
    pub fn reveal_pause(&self) -> Duration {
        Duration::from_millis(self.reveal_pause_ms)
    }

    /// Finished-board display before the reset.
    pub fn game_end_pause(&self) -> Duration {
        Duration::from_millis(self.game_end_pause_ms)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the persisted roster record.
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,

    /// Transition pacing.
    #[serde(default)]
    timings: Timings,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".spinner_xo")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            timings: Timings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(data_dir = %config.data_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be loaded.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the data directory.
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timings().spin_min(), Duration::from_secs(4));
        assert_eq!(config.timings().game_end_pause(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_timings_override() {
        let config = AppConfig::from_toml(
            r#"
            data_dir = "/tmp/xo"

            [timings]
            reveal_pause_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir(), &PathBuf::from("/tmp/xo"));
        assert_eq!(*config.timings().reveal_pause_ms(), 10);
        assert_eq!(*config.timings().spin_max_ms(), 7_000);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = AppConfig::from_toml("timings = 3").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
