use crate::layout::PanelStyle;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for squiffy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Render loop and persistence settings
    pub settings: Settings,
    /// Style applied to submenus that don't bring their own
    pub style: PanelStyle,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How often the terminal size is sampled, in milliseconds
    pub frame_period_ms: u64,
    /// How long input is solicited per loop iteration, in milliseconds
    pub input_window_ms: u64,
    /// Follow terminal resizes; when off the size is measured once at startup
    pub autoscale: bool,
    /// Where application state is saved; the data directory when unset
    pub state_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            frame_period_ms: 100,
            input_window_ms: 250,
            autoscale: true,
            state_path: None,
        }
    }
}

/// Shortest period the terminal size is sampled at
pub const MIN_FRAME_PERIOD: Duration = Duration::from_millis(1);

impl Settings {
    /// Sampling period, never shorter than `MIN_FRAME_PERIOD`
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_period_ms).max(MIN_FRAME_PERIOD)
    }

    pub fn input_window(&self) -> Duration {
        Duration::from_millis(self.input_window_ms)
    }
}

impl Config {
    /// Get the default configuration file path
    /// Returns ~/.config/squiffy/config.yaml on Unix-like systems
    /// Returns %APPDATA%\squiffy\config.yaml on Windows
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("squiffy");

        Ok(config_dir.join("config.yaml"))
    }

    /// Load configuration from a YAML file
    /// If the file doesn't exist, returns the default configuration
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from_file(path)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let yaml = serde_yaml::to_string(self).context("Failed to serialize configuration")?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
