//! Settings storage
//!
//! Manages persistence of runner locations.

use crate::storage::{get_data_dir, StorageError};
use crate::types::config::{default_cpu_runner_dir, default_gpu_runner_dir, RunnerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Where the GPU and CPU runners live
    #[serde(default)]
    pub runner: RunnerConfig,
}

impl Settings {
    /// Replace blank values with their defaults
    pub fn validate(&mut self) {
        if self.runner.gpu_runner_dir.as_os_str().is_empty() {
            self.runner.gpu_runner_dir = default_gpu_runner_dir();
        }
        if self.runner.cpu_runner_dir.as_os_str().is_empty() {
            self.runner.cpu_runner_dir = default_cpu_runner_dir();
        }
    }
}

/// Get the settings file path
pub fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from the data directory
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> Settings {
    match get_settings_path() {
        Ok(path) => load_settings_or_default(&path),
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

/// Load settings from `path`, falling back to defaults with a warning
pub fn load_settings_or_default(path: &Path) -> Settings {
    load_settings_from(path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings, using defaults: {}", e);
        Settings::default()
    })
}

/// Load settings from an explicit file
pub fn load_settings_from(path: &Path) -> Result<Settings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(Settings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: Settings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to the data directory
pub fn save_settings(settings: &Settings) -> Result<(), StorageError> {
    save_settings_to(&get_settings_path()?, settings)
}

/// Save settings to an explicit file, creating its parent directory
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
