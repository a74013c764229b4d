//! Little-endian header field reads.

use crate::error::{ModelFileError, Result};
use std::io::Read;

/// Read one little-endian u32 header field, consuming exactly 4 bytes
pub(crate) fn read_u32_le<R: Read + ?Sized>(reader: &mut R, field: &'static str) -> Result<u32> {
    let mut bytes = [0u8; 4];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| ModelFileError::from_read(e, field))?;
    Ok(u32::from_le_bytes(bytes))
}
