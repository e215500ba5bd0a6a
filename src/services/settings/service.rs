use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::TimelineConfig;

const CONFIG_FILE: &str = "config.toml";

/// Loads and saves the timeline offsets as a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform config directory.
    pub fn with_default_path() -> Result<Self> {
        Ok(Self::new(default_config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current config; a missing file yields the defaults.
    pub fn get(&self) -> Result<TimelineConfig> {
        load_config(&self.path)
    }

    pub fn update(&self, config: &TimelineConfig) -> Result<()> {
        save_config(&self.path, config)
    }

    /// Reset config to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&TimelineConfig::default())
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "meeting-timeline", "meeting-timeline")
        .context("Failed to determine the config directory")?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<TimelineConfig> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(TimelineConfig::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    let config = TimelineConfig::from_toml(&data)
        .with_context(|| format!("failed to parse config from {}", path.display()))?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &TimelineConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = config.to_toml().context("failed to serialize config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    log::info!("Saved timeline config to {}", path.display());
    Ok(())
}
