//! Magic number registry
//!
//! Maps the leading 4 bytes of a model file to its container kind.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const FILE_MAGIC_GGML: u32 = 0x6767_6d6c;
pub const FILE_MAGIC_GGMF: u32 = 0x6767_6d66;
pub const FILE_MAGIC_GGJT: u32 = 0x6767_6a74;
pub const FILE_MAGIC_GGLA: u32 = 0x6767_6c61;

/// Container families recognized by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    /// Legacy unversioned container
    #[serde(rename = "ggml")]
    Ggml,
    /// Versioned container, no mmap-friendly layout
    #[serde(rename = "ggmf")]
    Ggmf,
    /// Versioned container with aligned tensors
    #[serde(rename = "ggjt")]
    Ggjt,
    /// LoRA adapter
    #[serde(rename = "ggla")]
    Lora,
}

const REGISTRY: &[(u32, ContainerKind)] = &[
    (FILE_MAGIC_GGML, ContainerKind::Ggml),
    (FILE_MAGIC_GGMF, ContainerKind::Ggmf),
    (FILE_MAGIC_GGJT, ContainerKind::Ggjt),
    (FILE_MAGIC_GGLA, ContainerKind::Lora),
];

/// Look up the container kind for a magic number
pub fn lookup(magic: u32) -> Option<ContainerKind> {
    REGISTRY
        .iter()
        .find(|(m, _)| *m == magic)
        .map(|(_, kind)| *kind)
}

impl ContainerKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Ggml => "ggml",
            ContainerKind::Ggmf => "ggmf",
            ContainerKind::Ggjt => "ggjt",
            ContainerKind::Lora => "ggla",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
