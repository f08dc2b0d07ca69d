//! Run timing derived from the packet stream.

pub mod heuristics;
mod inferencer;

pub use heuristics::{FinishVolume, Heuristics, SpawnTrigger};
pub use inferencer::{Latch, TickRange, TickRangeInferencer};

/// Engine ticks per second.
pub const TICK_FREQUENCY: f64 = 60.0;

/// Converts a tick count to seconds. Takes `i64` so summed totals fit.
pub fn ticks_to_seconds(ticks: i64) -> f64 {
    ticks as f64 / TICK_FREQUENCY
}

/// Formats a tick count as `[h:]mm:ss.mmm`, or `m:ss.mmm` under an hour.
pub fn format_ticks(ticks: i32) -> String {
    let sign = if ticks < 0 { "-" } else { "" };
    let total_ms = (f64::from(ticks).abs() * 1000.0 / TICK_FREQUENCY).round() as u64;
    let ms = total_ms % 1000;
    let secs = (total_ms / 1000) % 60;
    let mins = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;

    if hours > 0 {
        format!("{}{}:{:02}:{:02}.{:03}", sign, hours, mins, secs, ms)
    } else {
        format!("{}{}:{:02}.{:03}", sign, mins, secs, ms)
    }
}
