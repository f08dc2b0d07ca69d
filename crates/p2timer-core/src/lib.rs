pub mod binary;
pub mod config;
pub mod demo;
pub mod dump;
pub mod error;
pub mod maps;
pub mod timing;

pub use config::Config;
pub use demo::{
    Command, CommandKind, CommandObserver, DemoFile, DemoStream, DemoSummary, Header, HeaderInfo,
    Payload, Position, UserCmd,
};
pub use dump::{CommandDumper, DumpFilter};
pub use error::{Error, Result};
pub use timing::{
    FinishVolume, Heuristics, SpawnTrigger, TICK_FREQUENCY, TickRange, TickRangeInferencer,
    format_ticks, ticks_to_seconds,
};
