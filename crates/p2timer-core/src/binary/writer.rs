//! Little-endian byte writer, the counterpart of [`ByteCursor`](super::ByteCursor).

/// Appends little-endian primitives to a growable buffer.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.data.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Writes `count` zero bytes.
    pub fn write_zeros(&mut self, count: usize) -> &mut Self {
        self.data.resize(self.data.len() + count, 0);
        self
    }

    /// Writes `bytes` into a fixed-width field, NUL-padding up to `width`.
    ///
    /// Input longer than `width` is cut off.
    pub fn write_fixed_string(&mut self, bytes: &[u8], width: usize) -> &mut Self {
        let len = bytes.len().min(width);
        self.data.extend_from_slice(&bytes[..len]);
        self.write_zeros(width - len)
    }

    /// Writes an i32 byte count followed by the bytes.
    pub fn write_length_prefixed(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_i32(bytes.len() as i32);
        self.write_bytes(bytes)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::ByteCursor;

    #[test]
    fn test_writer_primitives() {
        let mut writer = ByteWriter::new();
        writer.write_u8(7).write_i32(-2).write_f32(0.5);
        let bytes = writer.into_bytes();

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_u8().unwrap(), 7);
        assert_eq!(cursor.read_i32().unwrap(), -2);
        assert_eq!(cursor.read_f32().unwrap(), 0.5);
    }

    #[test]
    fn test_write_fixed_string_pads_and_truncates() {
        let mut writer = ByteWriter::new();
        writer.write_fixed_string(b"abc", 5);
        writer.write_fixed_string(b"abcdef", 4);
        assert_eq!(writer.into_bytes(), b"abc\0\0abcd");
    }

    #[test]
    fn test_write_length_prefixed() {
        let mut writer = ByteWriter::with_capacity(8);
        writer.write_length_prefixed(b"hi");
        assert_eq!(writer.len(), 6);
        assert_eq!(writer.into_bytes(), [2, 0, 0, 0, b'h', b'i']);
    }
}
