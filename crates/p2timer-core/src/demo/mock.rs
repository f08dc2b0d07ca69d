//! Synthetic demo builder for tests
//!
//! Provides a fluent API for assembling demo files byte by byte, so decoder
//! and timing logic can be tested without recorded demos.

use crate::binary::ByteWriter;
use crate::demo::{CommandKind, Header, Position};

/// Builder for synthetic demo files
///
/// The header is encoded when [`build`](Self::build) is called, so header
/// settings may be changed after commands have been added.
#[derive(Debug, Clone)]
pub struct MockDemoBuilder {
    header: Header,
    body: ByteWriter,
}

impl MockDemoBuilder {
    /// Create a builder for a demo recorded on `map` with no sign-on data
    pub fn new(map: &str) -> Self {
        Self {
            header: Header {
                demo_protocol: 4,
                network_protocol: 2001,
                server_name: b"localhost:27015".to_vec(),
                client_name: b"player".to_vec(),
                map_name: map.as_bytes().to_vec(),
                game_directory: b"portal2".to_vec(),
                playback_time: 0.0,
                ticks: 0,
                frames: 0,
                sign_on_length: 0,
            },
            body: ByteWriter::new(),
        }
    }

    /// Set the sign-on length recorded in the header
    pub fn sign_on_length(mut self, length: i32) -> Self {
        self.header.sign_on_length = length;
        self
    }

    /// Set the header's tick and frame counters
    pub fn ticks(mut self, ticks: i32, frames: i32) -> Self {
        self.header.ticks = ticks;
        self.header.frames = frames;
        self
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    fn prefix(&mut self, kind: CommandKind, tick: i32) {
        self.body.write_u8(kind as u8).write_i32(tick).write_u8(0);
    }

    /// Write a sign-on record followed by `data` (normally `sign_on_length` bytes)
    pub fn sign_on(mut self, tick: i32, data: &[u8]) -> Self {
        self.prefix(CommandKind::SignOn, tick);
        self.body.write_bytes(data);
        self
    }

    /// Write a packet record with an empty command blob
    pub fn packet(self, tick: i32, position: Position) -> Self {
        self.packet_with_blob(tick, position, &[])
    }

    pub fn packet_with_blob(mut self, tick: i32, position: Position, blob: &[u8]) -> Self {
        self.prefix(CommandKind::Packet, tick);
        self.body
            .write_zeros(4)
            .write_f32(position.x)
            .write_f32(position.y)
            .write_f32(position.z)
            .write_zeros(0x90)
            .write_length_prefixed(blob);
        self
    }

    /// Write packets at each tick, all at the same position
    pub fn packets(mut self, ticks: &[i32], position: Position) -> Self {
        for &tick in ticks {
            self = self.packet(tick, position);
        }
        self
    }

    pub fn sync_tick(mut self, tick: i32) -> Self {
        self.prefix(CommandKind::SyncTick, tick);
        self
    }

    /// Write a console command with the engine's trailing NUL
    pub fn console_cmd(mut self, tick: i32, text: &str) -> Self {
        self.prefix(CommandKind::ConsoleCmd, tick);
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        self.body.write_length_prefixed(&bytes);
        self
    }

    pub fn user_cmd(mut self, tick: i32, blob: &[u8]) -> Self {
        self.prefix(CommandKind::UserCmd, tick);
        self.body.write_zeros(4).write_length_prefixed(blob);
        self
    }

    /// Write a data tables record (layout guessed as a length-prefixed blob)
    pub fn data_tables(mut self, tick: i32, blob: &[u8]) -> Self {
        self.prefix(CommandKind::DataTables, tick);
        self.body.write_length_prefixed(blob);
        self
    }

    pub fn custom_data(mut self, tick: i32, blob: &[u8]) -> Self {
        self.prefix(CommandKind::CustomData, tick);
        self.body.write_zeros(4).write_length_prefixed(blob);
        self
    }

    pub fn string_tables(mut self, tick: i32, blob: &[u8]) -> Self {
        self.prefix(CommandKind::StringTables, tick);
        self.body.write_length_prefixed(blob);
        self
    }

    /// Write arbitrary bytes into the command stream
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.body.write_bytes(bytes);
        self
    }

    pub fn stop(mut self) -> Self {
        self.body.write_u8(CommandKind::Stop as u8);
        self
    }

    /// Build the demo bytes (header followed by the command stream)
    pub fn build(self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.extend_from_slice(&self.body.into_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_header() {
        let bytes = MockDemoBuilder::new("sp_a1_intro1")
            .sign_on_length(8)
            .ticks(120, 118)
            .build();

        let header = Header::from_bytes(&bytes).unwrap();
        assert!(header.is_map("sp_a1_intro1"));
        assert_eq!(header.sign_on_length, 8);
        assert_eq!(header.ticks, 120);
        assert_eq!(bytes.len(), Header::SIZE);
    }

    #[test]
    fn test_builder_packet_layout() {
        let bytes = MockDemoBuilder::new("map")
            .packet(5, Position::new(1.0, 2.0, 3.0))
            .build();
        let body = &bytes[Header::SIZE..];

        assert_eq!(body[0], CommandKind::Packet as u8);
        assert_eq!(&body[1..5], &5i32.to_le_bytes());
        assert_eq!(&body[10..14], &1.0f32.to_le_bytes());
        assert_eq!(body.len(), 1 + 4 + 1 + 4 + 12 + 0x90 + 4);
    }
}
