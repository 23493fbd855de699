use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_SEEK_STEP_MS, DEFAULT_SERVER_LABEL};
use crate::controls::ControlsSettings;
use crate::utils::ControlsError;
use crate::utils::errors::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    #[serde(default = "default_seek_step")]
    pub seek_step_ms: i64,

    #[serde(default = "default_server_label")]
    pub default_server_label: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Config {
    /// Load from the user config directory, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        info!("Config loaded successfully");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.controls_settings().validate()?;
        if self.playback.poll_interval_ms == 0 {
            return Err(ControlsError::Configuration(
                "poll_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn controls_settings(&self) -> ControlsSettings {
        ControlsSettings {
            seek_step_ms: self.playback.seek_step_ms,
            default_server_label: self.playback.default_server_label.clone(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.playback.poll_interval_ms)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ControlsError::Configuration("Failed to get config directory".to_string())
        })?;
        Ok(config_dir.join("playback-controls").join("config.toml"))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_step_ms: default_seek_step(),
            default_server_label: default_server_label(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

// Default value functions
fn default_seek_step() -> i64 { DEFAULT_SEEK_STEP_MS }
fn default_server_label() -> String { DEFAULT_SERVER_LABEL.to_string() }
fn default_poll_interval() -> u64 { DEFAULT_POLL_INTERVAL_MS }
fn default_log_filter() -> String { "playback_controls=info".to_string() }
