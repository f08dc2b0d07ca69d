//! Lazy command stream over a demo body.

use std::iter::FusedIterator;

use crate::binary::ByteCursor;
use crate::demo::command::{Command, decode_one};
use crate::demo::Header;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Running,
    Stopped,
    Failed,
}

/// Single-pass iterator over the commands following a header.
///
/// Yields commands in file order until the `stop` record, then `None`.
/// A decode failure is yielded once as `Some(Err(_))` and ends the stream;
/// commands yielded before it stay valid. Ticks are passed through as
/// recorded, without any ordering check.
///
/// ```
/// use p2timer_core::binary::ByteCursor;
/// use p2timer_core::demo::{DemoStream, Header, Position};
/// use p2timer_core::demo::mock::MockDemoBuilder;
///
/// let bytes = MockDemoBuilder::new("sp_a2_intro")
///     .packet(0, Position::default())
///     .packet(1, Position::default())
///     .stop()
///     .build();
///
/// let mut cursor = ByteCursor::new(&bytes);
/// let header = Header::decode(&mut cursor).unwrap();
/// let ticks: Vec<i32> = DemoStream::new(cursor, &header)
///     .map(|command| command.unwrap().tick)
///     .collect();
/// assert_eq!(ticks, vec![0, 1]);
/// ```
pub struct DemoStream<'a> {
    cursor: ByteCursor<'a>,
    header: &'a Header,
    commands_read: usize,
    state: StreamState,
}

impl<'a> DemoStream<'a> {
    /// Create a stream from a cursor positioned just past `header`.
    pub fn new(cursor: ByteCursor<'a>, header: &'a Header) -> Self {
        Self {
            cursor,
            header,
            commands_read: 0,
            state: StreamState::Running,
        }
    }

    /// Number of commands yielded so far.
    pub fn commands_read(&self) -> usize {
        self.commands_read
    }

    /// Current byte offset in the demo.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// True once the `stop` record has been read.
    pub fn reached_stop(&self) -> bool {
        self.state == StreamState::Stopped
    }

    pub fn header(&self) -> &'a Header {
        self.header
    }
}

impl Iterator for DemoStream<'_> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != StreamState::Running {
            return None;
        }
        match decode_one(&mut self.cursor, self.header) {
            Ok(Some(command)) => {
                self.commands_read += 1;
                Some(Ok(command))
            }
            Ok(None) => {
                self.state = StreamState::Stopped;
                None
            }
            Err(e) => {
                self.state = StreamState::Failed;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for DemoStream<'_> {}
