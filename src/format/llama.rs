//! Llama hyperparameter layout
//!
//! The fixed block that follows the version field in GGJT files.

use crate::error::Result;
use crate::format::reader::read_u32_le;
use crate::types::model::{FileType, ModelDescriptor, ModelFamily, SizeTier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

/// Quantization level stored in the llama `file_type` field
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlamaFileType {
    F32,
    F16,
    Q4_0,
    Q4_1,
    Q4_1_F16,
    Q8_0,
    Q5_0,
    Q5_1,
    Q2_K,
    Q3_K_S,
    Q3_K_M,
    Q3_K_L,
    Q4_K_S,
    Q4_K_M,
    Q5_K_S,
    Q5_K_M,
    Q6_K,
    Unknown,
}

impl LlamaFileType {
    pub fn from_u32(value: u32) -> Self {
        // 5 and 6 were Q4_2/Q4_3, since removed upstream
        match value {
            0 => LlamaFileType::F32,
            1 => LlamaFileType::F16,
            2 => LlamaFileType::Q4_0,
            3 => LlamaFileType::Q4_1,
            4 => LlamaFileType::Q4_1_F16,
            7 => LlamaFileType::Q8_0,
            8 => LlamaFileType::Q5_0,
            9 => LlamaFileType::Q5_1,
            10 => LlamaFileType::Q2_K,
            11 => LlamaFileType::Q3_K_S,
            12 => LlamaFileType::Q3_K_M,
            13 => LlamaFileType::Q3_K_L,
            14 => LlamaFileType::Q4_K_S,
            15 => LlamaFileType::Q4_K_M,
            16 => LlamaFileType::Q5_K_S,
            17 => LlamaFileType::Q5_K_M,
            18 => LlamaFileType::Q6_K,
            _ => LlamaFileType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LlamaFileType::F32 => "F32",
            LlamaFileType::F16 => "F16",
            LlamaFileType::Q4_0 => "Q4_0",
            LlamaFileType::Q4_1 => "Q4_1",
            LlamaFileType::Q4_1_F16 => "Q4_1_F16",
            LlamaFileType::Q8_0 => "Q8_0",
            LlamaFileType::Q5_0 => "Q5_0",
            LlamaFileType::Q5_1 => "Q5_1",
            LlamaFileType::Q2_K => "Q2_K",
            LlamaFileType::Q3_K_S => "Q3_K_S",
            LlamaFileType::Q3_K_M => "Q3_K_M",
            LlamaFileType::Q3_K_L => "Q3_K_L",
            LlamaFileType::Q4_K_S => "Q4_K_S",
            LlamaFileType::Q4_K_M => "Q4_K_M",
            LlamaFileType::Q5_K_S => "Q5_K_S",
            LlamaFileType::Q5_K_M => "Q5_K_M",
            LlamaFileType::Q6_K => "Q6_K",
            LlamaFileType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LlamaFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw llama hyperparameters, in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlamaHyperparameters {
    /// Vocabulary size
    pub n_vocab: u32,
    /// Embedding width
    pub n_embd: u32,
    pub n_mult: u32,
    pub n_head: u32,
    /// Number of transformer layers
    pub n_layer: u32,
    pub n_rot: u32,
    /// Raw quantization tag, see [`LlamaFileType::from_u32`]
    pub file_type: u32,
}

impl LlamaHyperparameters {
    /// Size of the block on disk
    pub const SIZE: usize = 7 * 4;

    /// Read the block from the current stream position
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            n_vocab: read_u32_le(reader, "n_vocab")?,
            n_embd: read_u32_le(reader, "n_embd")?,
            n_mult: read_u32_le(reader, "n_mult")?,
            n_head: read_u32_le(reader, "n_head")?,
            n_layer: read_u32_le(reader, "n_layer")?,
            n_rot: read_u32_le(reader, "n_rot")?,
            file_type: read_u32_le(reader, "file_type")?,
        })
    }

    pub fn descriptor(&self) -> ModelDescriptor {
        ModelDescriptor {
            family: ModelFamily::Llama,
            size_tier: SizeTier::from_layer_count(self.n_layer),
            file_type: FileType::Llama(LlamaFileType::from_u32(self.file_type)),
        }
    }
}
