//! Error types
//!
//! Errors surfaced by file resolution and runner selection.

use crate::format::ContainerKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a model file or selecting a runner
#[derive(Debug, Error)]
pub enum ModelFileError {
    /// The stream ended before a header field was fully read
    #[error("Truncated header: not enough bytes for {field}")]
    Truncated { field: &'static str },
    /// The leading magic number is not a registered container
    #[error("Unrecognized model file format (magic 0x{magic:08x})")]
    UnrecognizedFormat { magic: u32 },
    /// The container is known but this version is not
    #[error("Unsupported {kind} version: {version}")]
    UnsupportedVersion { kind: ContainerKind, version: u32 },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Neither runner candidate can be used on this machine
    #[error("No runner available (gpu: {}, cpu: {})", gpu.display(), cpu.display())]
    NoRunnerAvailable { gpu: PathBuf, cpu: PathBuf },
}

impl ModelFileError {
    /// Map a read failure on a header field, turning short reads into `Truncated`
    pub(crate) fn from_read(err: io::Error, field: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ModelFileError::Truncated { field }
        } else {
            ModelFileError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelFileError>;
