use serde::Serialize;
use tracing::debug;

use crate::demo::{Command, Header, Payload, Position};
use crate::error::{Error, Result};
use crate::timing::ticks_to_seconds;
use crate::timing::heuristics::{FinishVolume, Heuristics, SpawnTrigger};

/// First-match latch for a corrected tick.
///
/// ## Transitions
///
/// - Unset -> Corrected (first matching packet)
/// - Corrected -> Corrected is blocked: once set, the tick never changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latch {
    #[default]
    Unset,
    Corrected(i32),
}

impl Latch {
    /// Set the tick if still unset. Returns true if this call set it.
    pub fn latch(&mut self, tick: i32) -> bool {
        match self {
            Self::Unset => {
                *self = Self::Corrected(tick);
                true
            }
            Self::Corrected(_) => false,
        }
    }

    pub fn tick(&self) -> Option<i32> {
        match self {
            Self::Unset => None,
            Self::Corrected(tick) => Some(*tick),
        }
    }
}

/// Final run boundaries of one demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickRange {
    pub start: i32,
    pub end: i32,
}

impl TickRange {
    pub fn elapsed_ticks(&self) -> i32 {
        self.end.saturating_sub(self.start)
    }

    pub fn elapsed_seconds(&self) -> f64 {
        ticks_to_seconds(i64::from(self.elapsed_ticks()))
    }
}

/// Derives the run's start and end ticks from the packet stream.
///
/// The naive range runs from the first to the last packet with a
/// non-negative tick. On maps with a configured trigger, the first packet
/// whose position matches sets a corrected tick that overrides the naive one.
#[derive(Debug, Clone)]
pub struct TickRangeInferencer {
    map_name: String,
    start_trigger: Option<SpawnTrigger>,
    end_trigger: Option<FinishVolume>,
    first_tick: Option<i32>,
    last_tick: Option<i32>,
    corrected_start: Latch,
    corrected_end: Latch,
}

impl TickRangeInferencer {
    pub fn new(header: &Header, heuristics: &Heuristics) -> Self {
        Self {
            map_name: header.map_name_text(),
            start_trigger: heuristics.start_for(header).cloned(),
            end_trigger: heuristics.end_for(header).cloned(),
            first_tick: None,
            last_tick: None,
            corrected_start: Latch::Unset,
            corrected_end: Latch::Unset,
        }
    }

    /// Feed one decoded command. Only packet records are considered.
    pub fn observe(&mut self, command: &Command) {
        if let Payload::Packet { position } = command.payload {
            self.observe_packet(command.tick, position);
        }
    }

    /// Feed one packet tick and position.
    pub fn observe_packet(&mut self, tick: i32, position: Position) {
        if tick < 0 {
            return;
        }

        if self.first_tick.is_none() {
            self.first_tick = Some(tick);
        }
        self.last_tick = Some(tick);

        if let Some(trigger) = &self.start_trigger {
            let corrected = tick.saturating_add(trigger.tick_offset);
            if trigger.matches(position) && self.corrected_start.latch(corrected) {
                debug!(
                    "Start trigger on {} at tick {} -> {}",
                    self.map_name, tick, corrected
                );
            }
        }

        if let Some(volume) = &self.end_trigger {
            let corrected = tick.saturating_add(volume.tick_offset);
            if volume.matches(position) && self.corrected_end.latch(corrected) {
                debug!(
                    "End trigger on {} at tick {} -> {}",
                    self.map_name, tick, corrected
                );
            }
        }
    }

    pub fn naive_start(&self) -> Option<i32> {
        self.first_tick
    }

    pub fn naive_end(&self) -> Option<i32> {
        self.last_tick
    }

    pub fn corrected_start(&self) -> Latch {
        self.corrected_start
    }

    pub fn corrected_end(&self) -> Latch {
        self.corrected_end
    }

    /// Effective start: corrected if set, otherwise naive.
    pub fn start(&self) -> Option<i32> {
        self.corrected_start.tick().or(self.first_tick)
    }

    /// Effective end: corrected if set, otherwise naive.
    pub fn end(&self) -> Option<i32> {
        self.corrected_end.tick().or(self.last_tick)
    }

    /// Finalize into a [`TickRange`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTickRange`] if no qualifying packet was seen.
    pub fn finish(self) -> Result<TickRange> {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => Ok(TickRange { start, end }),
            _ => Err(Error::MissingTickRange {
                map_name: self.map_name,
            }),
        }
    }
}
