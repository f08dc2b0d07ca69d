//! Demo command records.
//!
//! Each record starts with a one-byte tag. Every tag except `stop` is followed
//! by an i32 tick, one unknown byte, and a tag-specific payload.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, FromRepr, IntoStaticStr};
use tracing::trace;

use crate::binary::{ByteCursor, decode_text};
use crate::demo::Header;
use crate::error::{Error, Result};

/// Unknown bytes between a packet's tick prefix and its position.
const PACKET_PRE_POSITION: usize = 4;
/// Unknown bytes between a packet's position and its command blob.
const PACKET_POST_POSITION: usize = 0x90;
/// Unknown bytes before the blob of `user_cmd` and `custom_data` records.
const BLOB_PREFIX: usize = 4;
/// Bytes of a `user_cmd` blob exposed as two i32 fields.
const USER_CMD_MIN_LEN: usize = 8;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    SignOn = 1,
    Packet = 2,
    SyncTick = 3,
    ConsoleCmd = 4,
    UserCmd = 5,
    DataTables = 6,
    Stop = 7,
    CustomData = 8,
    StringTables = 9,
}

impl CommandKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// World position carried by a packet record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// `user_cmd` payload.
///
/// The first eight bytes of the blob are exposed as two i32 values without
/// any assumed meaning; the rest is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCmd {
    pub leading: [i32; 2],
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    SignOn,
    Packet { position: Position },
    SyncTick,
    ConsoleCmd(String),
    UserCmd(UserCmd),
    CustomData(Vec<u8>),
    StringTables(Vec<u8>),
}

impl Payload {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SignOn => CommandKind::SignOn,
            Self::Packet { .. } => CommandKind::Packet,
            Self::SyncTick => CommandKind::SyncTick,
            Self::ConsoleCmd(_) => CommandKind::ConsoleCmd,
            Self::UserCmd(_) => CommandKind::UserCmd,
            Self::CustomData(_) => CommandKind::CustomData,
            Self::StringTables(_) => CommandKind::StringTables,
        }
    }
}

/// One decoded command record.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Offset of the tag byte in the demo.
    pub offset: usize,
    pub tick: i32,
    pub payload: Payload,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        self.payload.kind()
    }

    /// Player position, for packet records.
    pub fn position(&self) -> Option<Position> {
        match self.payload {
            Payload::Packet { position } => Some(position),
            _ => None,
        }
    }
}

/// Decodes one command record.
///
/// Returns `Ok(None)` when the `stop` tag is read; nothing after the tag is
/// consumed in that case.
///
/// # Errors
///
/// - [`Error::UnknownCommandTag`] for tags outside the known set.
/// - [`Error::UnsupportedCommand`] for `data_tables`, whose layout is unknown.
/// - [`Error::MalformedUserCommand`] for a `user_cmd` blob under 8 bytes.
/// - [`Error::TruncatedInput`] / [`Error::InvalidLength`] for short input or
///   negative length prefixes.
pub fn decode_one(cursor: &mut ByteCursor<'_>, header: &Header) -> Result<Option<Command>> {
    let offset = cursor.position();
    let tag = cursor.read_u8()?;
    let kind = CommandKind::from_u8(tag).ok_or(Error::UnknownCommandTag { tag, offset })?;
    if kind == CommandKind::Stop {
        trace!("stop at {:#x}", offset);
        return Ok(None);
    }

    let tick = cursor.read_i32()?;
    cursor.skip(1)?;

    let payload = match kind {
        CommandKind::SignOn => {
            let length_offset = cursor.position();
            let length = usize::try_from(header.sign_on_length).map_err(|_| {
                Error::InvalidLength {
                    offset: length_offset,
                    length: header.sign_on_length,
                }
            })?;
            cursor.skip(length)?;
            Payload::SignOn
        }
        CommandKind::Packet => {
            cursor.skip(PACKET_PRE_POSITION)?;
            let position = Position {
                x: cursor.read_f32()?,
                y: cursor.read_f32()?,
                z: cursor.read_f32()?,
            };
            cursor.skip(PACKET_POST_POSITION)?;
            cursor.skip_length_prefixed()?;
            Payload::Packet { position }
        }
        CommandKind::SyncTick => Payload::SyncTick,
        CommandKind::ConsoleCmd => Payload::ConsoleCmd(decode_text(cursor.read_length_prefixed()?)),
        CommandKind::UserCmd => {
            cursor.skip(BLOB_PREFIX)?;
            let blob = cursor.read_length_prefixed()?;
            if blob.len() < USER_CMD_MIN_LEN {
                return Err(Error::MalformedUserCommand {
                    offset,
                    length: blob.len(),
                });
            }
            let (head, data) = blob.split_at(USER_CMD_MIN_LEN);
            let mut first = [0u8; 4];
            let mut second = [0u8; 4];
            first.copy_from_slice(&head[..4]);
            second.copy_from_slice(&head[4..]);
            Payload::UserCmd(UserCmd {
                leading: [i32::from_le_bytes(first), i32::from_le_bytes(second)],
                data: data.to_vec(),
            })
        }
        CommandKind::DataTables => return Err(Error::UnsupportedCommand { kind, offset }),
        CommandKind::CustomData => {
            cursor.skip(BLOB_PREFIX)?;
            Payload::CustomData(cursor.read_length_prefixed()?.to_vec())
        }
        CommandKind::StringTables => Payload::StringTables(cursor.read_length_prefixed()?.to_vec()),
        CommandKind::Stop => return Ok(None),
    };

    trace!("{} at {:#x} tick={}", kind, offset, tick);

    Ok(Some(Command {
        offset,
        tick,
        payload,
    }))
}
