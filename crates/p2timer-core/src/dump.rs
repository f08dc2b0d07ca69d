//! Human-readable command listing.
//!
//! [`CommandDumper`] is a [`CommandObserver`] that writes one line per command
//! inside a tick window:
//!
//! ```text
//!    100 : packet       : x:  -8674.00  y:  +1773.00  z:    +28.00
//!        : user_cmd     : (    12) (     0) 01 02 03
//! ```

use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::{self, Write};

use strum::IntoEnumIterator;

use crate::demo::{Command, CommandKind, CommandObserver, Payload};

/// Opaque blobs longer than this are cut off in the listing.
const MAX_HEX_BYTES: usize = 32;

/// Which commands to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFilter {
    pub from_tick: Option<i32>,
    pub to_tick: Option<i32>,
    pub kinds: HashSet<CommandKind>,
}

impl Default for DumpFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl DumpFilter {
    /// Every command at every tick.
    pub fn all() -> Self {
        Self {
            from_tick: None,
            to_tick: None,
            kinds: CommandKind::iter().collect(),
        }
    }

    /// Only the given kinds.
    pub fn include(kinds: &[CommandKind]) -> Self {
        Self {
            kinds: kinds.iter().copied().collect(),
            ..Self::all()
        }
    }

    /// Every kind except the given ones.
    pub fn exclude(kinds: &[CommandKind]) -> Self {
        let mut filter = Self::all();
        for kind in kinds {
            filter.kinds.remove(kind);
        }
        filter
    }

    /// Restrict to ticks in `from..=to` (either bound optional).
    pub fn ticks(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.from_tick = from;
        self.to_tick = to;
        self
    }

    pub fn matches(&self, command: &Command) -> bool {
        self.kinds.contains(&command.kind())
            && self.from_tick.is_none_or(|from| command.tick >= from)
            && self.to_tick.is_none_or(|to| command.tick <= to)
    }
}

/// Writes matching commands to `out` as they are decoded.
///
/// The observer hook cannot fail, so the first write error is kept and
/// returned from [`finish`](Self::finish); later commands are dropped.
pub struct CommandDumper<W: Write> {
    out: W,
    filter: DumpFilter,
    last_tick: Option<i32>,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> CommandDumper<W> {
    pub fn new(out: W, filter: DumpFilter) -> Self {
        Self {
            out,
            filter,
            last_tick: None,
            written: 0,
            error: None,
        }
    }

    /// Number of lines written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> CommandObserver for CommandDumper<W> {
    fn observe(&mut self, command: &Command) {
        if self.error.is_some() || !self.filter.matches(command) {
            return;
        }

        let same_tick = self.last_tick == Some(command.tick);
        let line = format_command(command, same_tick);
        match writeln!(self.out, "{}", line) {
            Ok(()) => self.written += 1,
            Err(e) => self.error = Some(e),
        }
        self.last_tick = Some(command.tick);
    }
}

/// Format one listing line. With `same_tick` the tick column is left blank.
pub fn format_command(command: &Command, same_tick: bool) -> String {
    let tick = if same_tick {
        String::new()
    } else {
        command.tick.to_string()
    };
    format!(
        "{:>6} : {:<12} : {}",
        tick,
        command.kind().name(),
        format_payload(&command.payload)
    )
}

pub fn format_payload(payload: &Payload) -> String {
    match payload {
        Payload::SignOn | Payload::SyncTick => "-".to_string(),
        Payload::Packet { position } => format!(
            "x:{:+10.2}  y:{:+10.2}  z:{:+10.2}",
            position.x, position.y, position.z
        ),
        Payload::ConsoleCmd(text) => text.clone(),
        Payload::UserCmd(cmd) => format!(
            "({:6}) ({:6}) {}",
            cmd.leading[0],
            cmd.leading[1],
            format_hex(&cmd.data)
        ),
        Payload::CustomData(data) | Payload::StringTables(data) => format_hex(data),
    }
}

/// Space-separated hex, cut off after a fixed number of bytes.
pub fn format_hex(data: &[u8]) -> String {
    let mut out = String::new();
    for (i, byte) in data.iter().take(MAX_HEX_BYTES).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:02X}", byte);
    }
    if data.len() > MAX_HEX_BYTES {
        let _ = write!(out, " ... ({} bytes)", data.len());
    }
    out
}
