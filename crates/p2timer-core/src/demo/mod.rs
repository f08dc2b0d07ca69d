//! Source engine demo (`.dem`) decoding.
//!
//! Layout (little-endian):
//!
//! ```text
//! [MAGIC "HL2DEMO\0"] [Header, 1064 bytes]
//! [tag u8] [tick i32] [unknown u8] [payload] ... [tag = stop]
//! ```

mod command;
mod file;
mod header;
mod stream;

// Synthetic demo builder for tests (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use command::{Command, CommandKind, Payload, Position, UserCmd, decode_one};
pub use file::{CommandObserver, DemoFile, DemoSummary};
pub use header::{Header, HeaderInfo, MAGIC, MAX_OSPATH};
pub use stream::DemoStream;

#[doc(hidden)]
pub use mock::MockDemoBuilder;
