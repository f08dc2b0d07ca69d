//! Fixed-size demo file header.

use serde::Serialize;
use tracing::debug;

use crate::binary::{ByteCursor, ByteWriter, decode_text};
use crate::error::{Error, Result};

/// Magic signature at offset 0 of every demo: `"HL2DEMO"` followed by NUL.
pub const MAGIC: [u8; 8] = *b"HL2DEMO\0";

/// Width of each path/name field in the header.
pub const MAX_OSPATH: usize = 260;

/// Decoded demo header.
///
/// The four name fields are kept as raw bytes with trailing NUL padding
/// removed; use the `*_text` accessors for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub demo_protocol: i32,
    pub network_protocol: i32,
    pub server_name: Vec<u8>,
    pub client_name: Vec<u8>,
    pub map_name: Vec<u8>,
    pub game_directory: Vec<u8>,
    /// Length of the demo in seconds, as recorded by the engine.
    pub playback_time: f32,
    pub ticks: i32,
    pub frames: i32,
    /// Length of the sign-on data sent before the first frame.
    pub sign_on_length: i32,
}

impl Header {
    /// Encoded size of the header, including the magic.
    pub const SIZE: usize = MAGIC.len() + 4 * 2 + MAX_OSPATH * 4 + 4 * 4;

    /// Decodes the header from a cursor positioned at the start of the file.
    ///
    /// On success the cursor points at the first command tag.
    ///
    /// # Errors
    ///
    /// - [`Error::BadMagic`] if the input does not start with [`MAGIC`]
    ///   (including empty input).
    /// - [`Error::TruncatedInput`] if the input ends inside the header.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let head = cursor.peek(MAGIC.len());
        if head.is_empty() || head != &MAGIC[..head.len()] {
            return Err(Error::BadMagic);
        }
        cursor.skip(MAGIC.len())?;

        let header = Self {
            demo_protocol: cursor.read_i32()?,
            network_protocol: cursor.read_i32()?,
            server_name: cursor.read_fixed_string(MAX_OSPATH, true)?.to_vec(),
            client_name: cursor.read_fixed_string(MAX_OSPATH, true)?.to_vec(),
            map_name: cursor.read_fixed_string(MAX_OSPATH, true)?.to_vec(),
            game_directory: cursor.read_fixed_string(MAX_OSPATH, true)?.to_vec(),
            playback_time: cursor.read_f32()?,
            ticks: cursor.read_i32()?,
            frames: cursor.read_i32()?,
            sign_on_length: cursor.read_i32()?,
        };

        debug!(
            "Demo header: map={} protocol={}/{} ticks={} sign_on={}",
            header.map_name_text(),
            header.demo_protocol,
            header.network_protocol,
            header.ticks,
            header.sign_on_length
        );

        Ok(header)
    }

    /// Decodes a header from the start of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::decode(&mut ByteCursor::new(data))
    }

    /// Encodes the header back into its on-disk layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(Self::SIZE);
        writer
            .write_bytes(&MAGIC)
            .write_i32(self.demo_protocol)
            .write_i32(self.network_protocol)
            .write_fixed_string(&self.server_name, MAX_OSPATH)
            .write_fixed_string(&self.client_name, MAX_OSPATH)
            .write_fixed_string(&self.map_name, MAX_OSPATH)
            .write_fixed_string(&self.game_directory, MAX_OSPATH)
            .write_f32(self.playback_time)
            .write_i32(self.ticks)
            .write_i32(self.frames)
            .write_i32(self.sign_on_length);
        writer.into_bytes()
    }

    /// Map name bytes up to the first NUL, the same span the text view shows.
    pub fn map_name_bytes(&self) -> &[u8] {
        self.map_name.split(|&b| b == 0).next().unwrap_or_default()
    }

    /// Exact byte comparison of the map name, ignoring stale bytes after
    /// its terminator.
    pub fn is_map(&self, name: &str) -> bool {
        self.map_name_bytes() == name.as_bytes()
    }

    pub fn map_name_text(&self) -> String {
        decode_text(&self.map_name)
    }

    pub fn server_name_text(&self) -> String {
        decode_text(&self.server_name)
    }

    pub fn client_name_text(&self) -> String {
        decode_text(&self.client_name)
    }

    pub fn game_directory_text(&self) -> String {
        decode_text(&self.game_directory)
    }

    /// Text view of the header for reporting.
    pub fn info(&self) -> HeaderInfo {
        HeaderInfo {
            demo_protocol: self.demo_protocol,
            network_protocol: self.network_protocol,
            server_name: self.server_name_text(),
            client_name: self.client_name_text(),
            map_name: self.map_name_text(),
            game_directory: self.game_directory_text(),
            playback_time: self.playback_time,
            ticks: self.ticks,
            frames: self.frames,
            sign_on_length: self.sign_on_length,
        }
    }
}

/// Header with the name fields decoded to text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderInfo {
    pub demo_protocol: i32,
    pub network_protocol: i32,
    pub server_name: String,
    pub client_name: String,
    pub map_name: String,
    pub game_directory: String,
    pub playback_time: f32,
    pub ticks: i32,
    pub frames: i32,
    pub sign_on_length: i32,
}
