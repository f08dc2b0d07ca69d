//! Demo file facade: header, command stream and run timing in one pass.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::binary::ByteCursor;
use crate::demo::{Command, DemoStream, Header, HeaderInfo};
use crate::error::Result;
use crate::maps;
use crate::timing::{Heuristics, TickRange, TickRangeInferencer};

/// Receives every decoded command during the decode pass.
///
/// Observers only see shared references, so they cannot influence decoding
/// or timing. Any `FnMut(&Command)` closure is an observer.
pub trait CommandObserver {
    fn observe(&mut self, command: &Command);
}

impl<F: FnMut(&Command)> CommandObserver for F {
    fn observe(&mut self, command: &Command) {
        self(command)
    }
}

/// A fully decoded demo.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoFile {
    header: Header,
    range: TickRange,
    commands_read: usize,
}

impl DemoFile {
    /// Read and decode a demo from disk with the built-in heuristics.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &Heuristics::default(), None)
    }

    /// Read and decode a demo from disk.
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        heuristics: &Heuristics,
        observer: Option<&mut dyn CommandObserver>,
    ) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        debug!("Read {} bytes from {:?}", data.len(), path.as_ref());
        Self::parse(&data, heuristics, observer)
    }

    /// Read a demo to the end of `reader` and decode it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Decode an in-memory demo with the built-in heuristics.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(data, &Heuristics::default(), None)
    }

    /// Decode an in-memory demo.
    ///
    /// Decodes the header, drains the command stream through the tick range
    /// inferencer (calling `observer` for each command first), and finalizes
    /// the range. Any failure aborts the whole decode.
    pub fn parse(
        data: &[u8],
        heuristics: &Heuristics,
        mut observer: Option<&mut dyn CommandObserver>,
    ) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        let header = Header::decode(&mut cursor)?;
        let mut inferencer = TickRangeInferencer::new(&header, heuristics);

        let mut stream = DemoStream::new(cursor, &header);
        for command in stream.by_ref() {
            let command = command.inspect_err(|e| {
                debug!("Decode of '{}' failed: {}", header.map_name_text(), e);
            })?;
            if let Some(observer) = observer.as_deref_mut() {
                observer.observe(&command);
            }
            inferencer.observe(&command);
        }
        let commands_read = stream.commands_read();

        let range = inferencer.finish()?;
        debug!(
            "Decoded {} commands from '{}': ticks {}..{}",
            commands_read,
            header.map_name_text(),
            range.start,
            range.end
        );

        Ok(Self {
            header,
            range,
            commands_read,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn tick_range(&self) -> TickRange {
        self.range
    }

    pub fn start_tick(&self) -> i32 {
        self.range.start
    }

    pub fn end_tick(&self) -> i32 {
        self.range.end
    }

    pub fn elapsed_ticks(&self) -> i32 {
        self.range.elapsed_ticks()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.range.elapsed_seconds()
    }

    /// Number of commands decoded before `stop`.
    pub fn commands_read(&self) -> usize {
        self.commands_read
    }

    pub fn summary(&self) -> DemoSummary {
        let map_name = self.header.map_name_text();
        DemoSummary {
            chapter: maps::chapter_of(&map_name),
            header: self.header.info(),
            start_tick: self.range.start,
            end_tick: self.range.end,
            elapsed_ticks: self.elapsed_ticks(),
            elapsed_seconds: self.elapsed_seconds(),
            commands: self.commands_read,
        }
    }
}

/// Serializable report of a decoded demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoSummary {
    pub header: HeaderInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u8>,
    pub start_tick: i32,
    pub end_tick: i32,
    pub elapsed_ticks: i32,
    pub elapsed_seconds: f64,
    pub commands: usize,
}

impl DemoSummary {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::mock::MockDemoBuilder;
    use crate::demo::{CommandKind, Position};
    use crate::error::Error;

    #[test]
    fn test_from_bytes_naive_range() {
        let bytes = MockDemoBuilder::new("sp_a2_bridge_intro")
            .sign_on(0, &[])
            .packets(&[100, 105, 110, 200], Position::default())
            .stop()
            .build();

        let demo = DemoFile::from_bytes(&bytes).unwrap();
        assert!(demo.header().is_map("sp_a2_bridge_intro"));
        assert_eq!(demo.start_tick(), 100);
        assert_eq!(demo.end_tick(), 200);
        assert_eq!(demo.elapsed_ticks(), 100);
        assert!((demo.elapsed_seconds() - 1.667).abs() < 1e-3);
        assert_eq!(demo.commands_read(), 5);
    }

    #[test]
    fn test_observer_sees_every_command() {
        let bytes = MockDemoBuilder::new("sp_a2_intro")
            .console_cmd(0, "echo hi")
            .packets(&[1, 2], Position::default())
            .stop()
            .build();

        let mut kinds = Vec::new();
        let mut observer = |command: &Command| kinds.push(command.kind());
        let demo = DemoFile::parse(&bytes, &Heuristics::default(), Some(&mut observer)).unwrap();

        assert_eq!(
            kinds,
            vec![CommandKind::ConsoleCmd, CommandKind::Packet, CommandKind::Packet]
        );
        assert_eq!(demo.elapsed_ticks(), 1);
    }

    #[test]
    fn test_observer_sees_commands_before_failure() {
        let bytes = MockDemoBuilder::new("sp_a2_intro")
            .packet(1, Position::default())
            .raw(&[0x63])
            .build();

        let mut seen = 0;
        let mut observer = |_: &Command| seen += 1;
        let result = DemoFile::parse(&bytes, &Heuristics::default(), Some(&mut observer));

        assert!(matches!(result, Err(Error::UnknownCommandTag { tag: 0x63, .. })));
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_no_packets_is_missing_range() {
        let bytes = MockDemoBuilder::new("sp_a2_intro")
            .sign_on(0, &[])
            .sync_tick(0)
            .stop()
            .build();
        assert!(matches!(
            DemoFile::from_bytes(&bytes),
            Err(Error::MissingTickRange { .. })
        ));
    }

    #[test]
    fn test_from_reader() {
        let bytes = MockDemoBuilder::new("sp_a2_intro")
            .packets(&[3, 9], Position::default())
            .stop()
            .build();
        let demo = DemoFile::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(demo.elapsed_ticks(), 6);
    }

    #[test]
    fn test_summary() {
        let bytes = MockDemoBuilder::new("sp_a2_laser_stairs")
            .packets(&[0, 120], Position::default())
            .stop()
            .build();
        let summary = DemoFile::from_bytes(&bytes).unwrap().summary();

        assert_eq!(summary.header.map_name, "sp_a2_laser_stairs");
        assert_eq!(summary.chapter, Some(2));
        assert_eq!(summary.elapsed_ticks, 120);
        assert_eq!(summary.elapsed_seconds, 2.0);
        assert_eq!(summary.commands, 2);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["header"]["map_name"], "sp_a2_laser_stairs");
        assert_eq!(json["elapsed_ticks"], 120);
        assert!(summary.to_json_pretty().unwrap().contains("\"chapter\": 2"));
    }
}
