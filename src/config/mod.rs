//! Configuration module for feedwatch
//!
//! Application configuration lives in a single TOML file in the
//! platform-appropriate data directory:
//!
//! - **Linux**: `~/.local/share/feedwatch/feedwatch.toml`
//! - **macOS**: `~/Library/Application Support/feedwatch/feedwatch.toml`
//! - **Windows**: `%APPDATA%\feedwatch\feedwatch.toml`
//!
//! Missing file or unreadable contents fall back to defaults with a logged
//! warning; the application never refuses to start over configuration.

use crate::error::{FeedError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "feedwatch";

/// Config filename
pub const CONFIG_FILE: &str = "feedwatch.toml";

/// Default base URL of the feeder service
pub const DEFAULT_BASE_URL: &str = "http://192.168.1.68:6969";

/// Default automatic refresh cadence in Live mode
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default Live-mode trailing window in seconds
pub const DEFAULT_LIVE_WINDOW_SECS: i64 = 300;

/// Default HTTP connect timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default HTTP read timeout in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir()
        .ok_or_else(|| FeedError::Config("Could not determine app data directory".to_string()))?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            FeedError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Feeder service connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the feeder service, without trailing slash
    pub base_url: String,
    /// HTTP connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// HTTP read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

/// Refresh cadence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Automatic refresh cadence in Live mode, milliseconds
    pub interval_ms: u64,
    /// Live-mode trailing window when no clear has happened, seconds
    pub live_window_secs: i64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            live_window_secs: DEFAULT_LIVE_WINDOW_SECS,
        }
    }
}

/// Chart display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Suggested lower bound of the weight axis in grams
    pub suggested_min_grams: f64,
    /// Suggested upper bound of the weight axis in grams
    pub suggested_max_grams: f64,
    /// Draw smaller weights higher ("food remaining" semantics)
    pub invert_y: bool,
    /// Line width for the weight series
    pub line_width: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            suggested_min_grams: 0.0,
            suggested_max_grams: 200.0,
            invert_y: true,
            line_width: 1.5,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub poll: PollConfig,
    pub chart: ChartConfig,
}

impl AppConfig {
    /// Load configuration from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FeedError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| FeedError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = config_path()
            .ok_or_else(|| FeedError::Config("Could not determine config path".to_string()))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    /// Load configuration, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FeedError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| FeedError::Config(format!("Failed to write config: {}", e)))
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }
}
