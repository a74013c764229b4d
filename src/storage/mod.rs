//! Persistent storage
//!
//! Locates the data directory and persists user settings.

pub mod settings;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing persisted data
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Per-user data directory for this tool
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    ProjectDirs::from("", "", "modelfile")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
