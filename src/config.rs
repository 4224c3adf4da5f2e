//! Application configuration
//!
//! Loaded from a TOML file. Every field has a default, so a missing file or a
//! partial one both work.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::ConfigError;

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "DEAFEN_SERVER_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub audio: AudioConfig,
    pub notify: NotifyConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the HTTP listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.http_port)
    }
}

/// Audio tool and stream selection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Program used to query and mute streams
    pub tool: String,
    /// Application-name substrings identifying Discord streams
    pub app_patterns: Vec<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_AUDIO_TOOL.to_string(),
            app_patterns: DISCORD_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Desktop notification on startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub title: String,
    pub message: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Deafen server".to_string(),
            message: "Discord deafen server started.".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `$DEAFEN_SERVER_CONFIG`, else the per-user config file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load() -> crate::Result<Self> {
        match Self::config_path() {
            Some(path) => Ok(Self::load_from(&path)?),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve the config file location
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("", "", "deafen-server")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.audio.tool.trim().is_empty() {
            return Err(ConfigError::Invalid("audio.tool must not be empty".into()));
        }
        if self.audio.app_patterns.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "audio.app_patterns needs at least one non-empty pattern".into(),
            ));
        }
        Ok(())
    }
}
