//! Model types
//!
//! Defines the model descriptor decoded from a container header.

use crate::format::llama::LlamaFileType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture family of a decoded model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Llama,
    Unknown,
}

impl ModelFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Llama => "llama",
            ModelFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse parameter-count bucket, keyed by the model's layer count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    #[serde(rename = "3B")]
    Size3B,
    #[serde(rename = "7B")]
    Size7B,
    #[serde(rename = "13B")]
    Size13B,
    #[serde(rename = "34B")]
    Size34B,
    #[serde(rename = "30B")]
    Size30B,
    #[serde(rename = "65B")]
    Size65B,
    Unknown,
}

impl SizeTier {
    /// Map a layer count to its tier. Total: unmapped counts are `Unknown`.
    pub fn from_layer_count(n_layer: u32) -> Self {
        match n_layer {
            26 => SizeTier::Size3B,
            32 => SizeTier::Size7B,
            40 => SizeTier::Size13B,
            48 => SizeTier::Size34B,
            60 => SizeTier::Size30B,
            80 => SizeTier::Size65B,
            _ => SizeTier::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTier::Size3B => "3B",
            SizeTier::Size7B => "7B",
            SizeTier::Size13B => "13B",
            SizeTier::Size34B => "34B",
            SizeTier::Size30B => "30B",
            SizeTier::Size65B => "65B",
            SizeTier::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantization / storage format tag. Each layout brings its own set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileType {
    Llama(LlamaFileType),
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Llama(ft) => fmt::Display::fmt(ft, f),
        }
    }
}

/// Model information extracted from a container header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Architecture family ("unknown" when not identified)
    pub family: ModelFamily,
    /// Parameter-count bucket
    pub size_tier: SizeTier,
    /// Quantization of the weights
    pub file_type: FileType,
}
