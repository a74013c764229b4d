//! Container decoders
//!
//! One decoder per [`ContainerKind`]. Each reads its version field, checks it
//! against the kind's allow-list and, where a hyperparameter layout is known,
//! decodes a [`ModelDescriptor`].

use crate::error::{ModelFileError, Result};
use crate::format::llama::LlamaHyperparameters;
use crate::format::magic::ContainerKind;
use crate::format::reader::read_u32_le;
use crate::types::model::ModelDescriptor;
use std::io::Read;

/// Output of a successful container decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContainer {
    /// Version read from the header, 0 for unversioned containers
    pub version: u32,
    pub descriptor: Option<ModelDescriptor>,
}

impl ContainerKind {
    /// Versions this decoder accepts. Empty for unversioned containers.
    pub fn supported_versions(&self) -> &'static [u32] {
        match self {
            ContainerKind::Ggml => &[],
            ContainerKind::Ggmf => &[1],
            ContainerKind::Ggjt => &[1, 2, 3],
            ContainerKind::Lora => &[1],
        }
    }

    /// Decode the container header that follows the magic number.
    ///
    /// Leaves the stream positioned right after the bytes consumed. A rejected
    /// version stops the decode before any hyperparameters are read.
    pub fn decode<R: Read + ?Sized>(&self, reader: &mut R) -> Result<DecodedContainer> {
        if *self == ContainerKind::Ggml {
            // Nothing after the magic that we know how to read
            return Ok(DecodedContainer {
                version: 0,
                descriptor: None,
            });
        }

        let version = read_u32_le(reader, "version")?;
        tracing::debug!("{} container version {}", self, version);

        if !self.supported_versions().contains(&version) {
            tracing::warn!("Rejecting {} container with version {}", self, version);
            return Err(ModelFileError::UnsupportedVersion {
                kind: *self,
                version,
            });
        }

        let descriptor = match self {
            ContainerKind::Ggjt => Some(LlamaHyperparameters::read(reader)?.descriptor()),
            ContainerKind::Ggml | ContainerKind::Ggmf | ContainerKind::Lora => None,
        };

        Ok(DecodedContainer {
            version,
            descriptor,
        })
    }
}
