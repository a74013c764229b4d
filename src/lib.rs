//! modelfile
//!
//! Identifies legacy ggml-family model files from their header and selects
//! the runner build that should execute them.

pub mod error;
pub mod format;
pub mod inference;
pub mod storage;
pub mod system;
pub mod types;

pub use error::{ModelFileError, Result};
pub use format::{resolve, resolve_path, ContainerKind, ContainerMetadata, ResolvedFile};
pub use types::model::{FileType, ModelDescriptor, ModelFamily, SizeTier};
