//! Model file format resolution
//!
//! Sniffs the magic number at the start of a model file, dispatches to the
//! matching container decoder and assembles a [`ResolvedFile`].

pub mod container;
pub mod llama;
pub mod magic;
mod reader;

pub use container::DecodedContainer;
pub use magic::{lookup, ContainerKind};

use crate::error::{ModelFileError, Result};
use crate::types::model::{FileType, ModelDescriptor, ModelFamily, SizeTier};
use reader::read_u32_le;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Container kind and version of a resolved file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerMetadata {
    pub kind: ContainerKind,
    /// Only meaningful within `kind`; 0 for the unversioned ggml container
    pub version: u32,
}

/// A fully decoded model file header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFile {
    pub magic: u32,
    pub container: ContainerMetadata,
    /// Absent when the container carries no hyperparameters we can read
    pub descriptor: Option<ModelDescriptor>,
}

impl ResolvedFile {
    /// Container name, e.g. "ggjt"
    pub fn name(&self) -> &'static str {
        self.container.kind.name()
    }

    pub fn family(&self) -> Option<ModelFamily> {
        self.descriptor.as_ref().map(|d| d.family)
    }

    pub fn size_tier(&self) -> Option<SizeTier> {
        self.descriptor.as_ref().map(|d| d.size_tier)
    }

    pub fn file_type(&self) -> Option<FileType> {
        self.descriptor.as_ref().map(|d| d.file_type)
    }
}

/// Resolve a model file from a stream positioned at its first byte
pub fn resolve<R: Read + ?Sized>(reader: &mut R) -> Result<ResolvedFile> {
    let magic = read_u32_le(reader, "magic")?;
    let kind = lookup(magic).ok_or(ModelFileError::UnrecognizedFormat { magic })?;
    tracing::debug!("Magic 0x{:08x} identifies a {} container", magic, kind);

    let DecodedContainer {
        version,
        descriptor,
    } = kind.decode(reader)?;

    Ok(ResolvedFile {
        magic,
        container: ContainerMetadata { kind, version },
        descriptor,
    })
}

/// Open and resolve the model file at `path`
pub fn resolve_path(path: impl AsRef<Path>) -> Result<ResolvedFile> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let resolved = resolve(&mut BufReader::new(file))?;
    tracing::info!(
        "Resolved {} as {} v{}",
        path.display(),
        resolved.name(),
        resolved.container.version
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::llama::LlamaFileType;
    use super::magic::{FILE_MAGIC_GGJT, FILE_MAGIC_GGLA, FILE_MAGIC_GGMF, FILE_MAGIC_GGML};
    use super::*;
    use std::io::{Cursor, Write};

    fn u32s(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn ggjt(version: u32, n_layer: u32, file_type: u32) -> Vec<u8> {
        u32s(&[FILE_MAGIC_GGJT, version, 32000, 4096, 256, 32, n_layer, 128, file_type])
    }

    #[test]
    fn test_unrecognized_magic_stops_after_magic() {
        for magic in [0u32, 0x4655_4747, 0x1234_5678, u32::MAX] {
            let mut cursor = Cursor::new(u32s(&[magic, 1, 2, 3]));
            let err = resolve(&mut cursor).unwrap_err();
            assert!(matches!(err, ModelFileError::UnrecognizedFormat { magic: m } if m == magic));
            assert_eq!(cursor.position(), 4);
        }
    }

    #[test]
    fn test_short_magic_is_truncated() {
        for len in 0..4 {
            let mut cursor = Cursor::new(vec![0x74; len]);
            let err = resolve(&mut cursor).unwrap_err();
            assert!(matches!(err, ModelFileError::Truncated { field: "magic" }));
        }
    }

    /// Yields `data`, then fails with `kind` instead of reporting end of stream
    struct FailingReader {
        data: Cursor<Vec<u8>>,
        kind: std::io::ErrorKind,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.data.read(buf)? {
                0 if !buf.is_empty() => Err(std::io::Error::new(self.kind, "read failed")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_failure_mid_block_is_io() {
        let mut bytes = ggjt(3, 32, 2);
        bytes.truncate(20);
        let mut reader = FailingReader {
            data: Cursor::new(bytes),
            kind: std::io::ErrorKind::BrokenPipe,
        };

        let err = resolve(&mut reader).unwrap_err();
        match err {
            ModelFileError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_failure_on_magic_is_io() {
        let mut reader = FailingReader {
            data: Cursor::new(vec![0x74, 0x6a]),
            kind: std::io::ErrorKind::PermissionDenied,
        };
        assert!(matches!(resolve(&mut reader), Err(ModelFileError::Io(_))));
    }

    #[test]
    fn test_ggjt_known_tiers() {
        for (n_layer, tier) in [
            (32, SizeTier::Size7B),
            (40, SizeTier::Size13B),
            (80, SizeTier::Size65B),
        ] {
            for version in [1, 2, 3] {
                let resolved = resolve(&mut Cursor::new(ggjt(version, n_layer, 2))).unwrap();
                assert_eq!(resolved.magic, FILE_MAGIC_GGJT);
                assert_eq!(
                    resolved.container,
                    ContainerMetadata {
                        kind: ContainerKind::Ggjt,
                        version
                    }
                );
                assert_eq!(resolved.family(), Some(ModelFamily::Llama));
                assert_eq!(resolved.size_tier(), Some(tier));
                assert_eq!(resolved.file_type(), Some(FileType::Llama(LlamaFileType::Q4_0)));
            }
        }
    }

    #[test]
    fn test_ggjt_unmapped_tier_is_unknown() {
        let resolved = resolve(&mut Cursor::new(ggjt(3, 33, 15))).unwrap();
        assert_eq!(resolved.size_tier(), Some(SizeTier::Unknown));
        assert_eq!(resolved.size_tier().map(|t| t.to_string()), Some("Unknown".to_string()));
    }

    #[test]
    fn test_ggjt_unsupported_version() {
        let mut cursor = Cursor::new(ggjt(99, 32, 2));
        let err = resolve(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            ModelFileError::UnsupportedVersion { kind: ContainerKind::Ggjt, version: 99 }
        ));
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_versioned_containers_without_descriptor() {
        for (magic, kind) in [
            (FILE_MAGIC_GGMF, ContainerKind::Ggmf),
            (FILE_MAGIC_GGLA, ContainerKind::Lora),
        ] {
            let resolved = resolve(&mut Cursor::new(u32s(&[magic, 1]))).unwrap();
            assert_eq!(resolved.container, ContainerMetadata { kind, version: 1 });
            assert!(resolved.descriptor.is_none());
            assert!(resolved.family().is_none());
        }
    }

    #[test]
    fn test_plain_ggml() {
        let resolved = resolve(&mut Cursor::new(u32s(&[FILE_MAGIC_GGML]))).unwrap();
        assert_eq!(resolved.name(), "ggml");
        assert_eq!(resolved.container.version, 0);
        assert!(resolved.descriptor.is_none());
    }

    #[test]
    fn test_identical_streams_resolve_identically() {
        let bytes = ggjt(2, 40, 17);
        let first = resolve(&mut Cursor::new(bytes.clone())).unwrap();
        let second = resolve(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_resolved_file_json() {
        let resolved = resolve(&mut Cursor::new(ggjt(3, 40, 15))).unwrap();
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "magic": FILE_MAGIC_GGJT,
                "container": {"kind": "ggjt", "version": 3},
                "descriptor": {"family": "llama", "size_tier": "13B", "file_type": "Q4_K_M"}
            })
        );
    }

    #[test]
    fn test_resolve_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&ggjt(1, 26, 0)).unwrap();
        file.flush().unwrap();

        let resolved = resolve_path(file.path()).unwrap();
        assert_eq!(resolved.size_tier(), Some(SizeTier::Size3B));
        assert_eq!(resolved.file_type().map(|f| f.to_string()), Some("F32".to_string()));
    }

    #[test]
    fn test_resolve_missing_path_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_path(dir.path().join("missing.bin")).unwrap_err();
        assert!(matches!(err, ModelFileError::Io(_)));
    }
}
