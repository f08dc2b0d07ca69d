use thiserror::Error;

use crate::demo::CommandKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not a demo file: bad magic signature")]
    BadMagic,

    #[error("Truncated input at offset {offset:#x}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid length prefix {length} at offset {offset:#x}")]
    InvalidLength { offset: usize, length: i32 },

    #[error("Unknown command tag {tag} at offset {offset:#x}")]
    UnknownCommandTag { tag: u8, offset: usize },

    #[error("Unsupported command {kind} at offset {offset:#x}")]
    UnsupportedCommand { kind: CommandKind, offset: usize },

    #[error("Malformed user command at offset {offset:#x}: payload is {length} bytes, expected at least 8")]
    MalformedUserCommand { offset: usize, length: usize },

    #[error("No packet ticks found in demo for map '{map_name}'")]
    MissingTickRange { map_name: String },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Byte offset in the demo at which decoding failed, if the error has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::TruncatedInput { offset, .. }
            | Self::InvalidLength { offset, .. }
            | Self::UnknownCommandTag { offset, .. }
            | Self::UnsupportedCommand { offset, .. }
            | Self::MalformedUserCommand { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
