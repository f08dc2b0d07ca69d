//! Position-tracking reader for the demo byte stream.
//!
//! `ByteCursor` wraps a byte slice and maintains a current position, allowing
//! sequential little-endian reads of the primitive types found in demo files.
//! Every failed read reports the offset at which it started, so decode errors
//! can point at the exact byte that could not be consumed.

use encoding_rs::WINDOWS_1252;
use tracing::debug;

use crate::error::{Error, Result};

/// A position-tracking byte reader.
///
/// # Example
///
/// ```
/// use p2timer_core::binary::ByteCursor;
///
/// let data = [0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3F];
/// let mut cursor = ByteCursor::new(&data);
///
/// assert_eq!(cursor.read_i32().unwrap(), 0x12345678);
/// assert_eq!(cursor.read_f32().unwrap(), 1.0);
/// assert_eq!(cursor.position(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a new cursor positioned at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Absolute offset of the next byte to read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the whole demo buffer, independent of position.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-length demo buffer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left to decode.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns true once every byte has been consumed.
    pub fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns up to `max` bytes from the current position without advancing.
    pub fn peek(&self, max: usize) -> &'a [u8] {
        let start = self.pos.min(self.data.len());
        let end = start.saturating_add(max).min(self.data.len());
        &self.data[start..end]
    }

    fn truncated(&self, needed: usize) -> Error {
        Error::TruncatedInput {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }

    /// Reads exactly `count` bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedInput`] if fewer than `count` bytes remain.
    /// The position is left unchanged on failure.
    pub fn read_exact(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| self.truncated(count))?;

        let result = &self.data[self.pos..end];
        self.pos = end;
        Ok(result)
    }

    /// Skips `count` bytes without materializing them.
    ///
    /// Fails the same way as [`read_exact`](Self::read_exact).
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_exact(count).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a signed 32-bit integer (little-endian).
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a 32-bit float (little-endian).
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Reads a fixed-width string field of `len` bytes.
    ///
    /// Returns the raw bytes; with `trim_trailing_nulls` the NUL padding at the
    /// end is stripped. Interior NULs and non-UTF-8 bytes are kept as-is, use
    /// [`decode_text`] to turn the result into a displayable string.
    pub fn read_fixed_string(&mut self, len: usize, trim_trailing_nulls: bool) -> Result<&'a [u8]> {
        let bytes = self.read_exact(len)?;
        if trim_trailing_nulls {
            Ok(trim_nulls(bytes))
        } else {
            Ok(bytes)
        }
    }

    /// Reads a signed 32-bit byte count, rejecting negative values.
    pub fn read_length(&mut self) -> Result<usize> {
        let offset = self.pos;
        let length = self.read_i32()?;
        usize::try_from(length).map_err(|_| Error::InvalidLength { offset, length })
    }

    /// Reads a length-prefixed blob (i32 byte count followed by the bytes).
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_length()?;
        self.read_exact(len)
    }

    /// Skips a length-prefixed blob, returning its length.
    pub fn skip_length_prefixed(&mut self) -> Result<usize> {
        let len = self.read_length()?;
        self.skip(len)?;
        Ok(len)
    }
}

/// Strips trailing NUL padding.
pub fn trim_nulls(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Decodes engine text to a `String`, stopping at the first NUL.
///
/// Valid UTF-8 is taken as-is. Anything else is decoded as Windows-1252, the
/// code page older engine builds write paths and names in, so decoding never
/// fails.
pub fn decode_text(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let bytes = &bytes[..len];

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            debug!(
                "Text is not valid UTF-8 ({}), falling back to Windows-1252: {:?}",
                e,
                &bytes[..bytes.len().min(20)]
            );
            let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            decoded.into_owned()
        }
    }
}
