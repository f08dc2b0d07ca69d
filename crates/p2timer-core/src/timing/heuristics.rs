//! Per-map position triggers used to correct naive run boundaries.
//!
//! All coordinates and tick offsets here were measured from recorded demos.
//! They are best-effort values, not guarantees of the demo format, and may
//! need retuning for other game versions. Every value can be overridden from
//! the config file.

use serde::{Deserialize, Serialize};

use crate::demo::{Header, Position};
use crate::maps;

/// Built-in trigger values.
pub mod defaults {
    /// Player position on the first tick of control in the first level.
    pub const INTRO_SPAWN: [f32; 3] = [-8674.0, 1773.0, 28.0];

    /// Per-axis tolerance when comparing against the spawn point.
    pub const INTRO_SPAWN_TOLERANCE: f32 = 0.01;

    /// Ticks added to the spawn-match tick (input display latency).
    pub const INTRO_TICK_OFFSET: i32 = 1;

    /// XY centre of the finish volume in the final level.
    pub const FINALE_CENTER: [f32; 2] = [54.1, 159.2];

    /// Radius of the finish volume in the XY plane.
    pub const FINALE_RADIUS: f32 = 50.0;

    /// The player must be below this altitude to be inside the volume.
    pub const FINALE_Z_BELOW: f32 = -201.4;

    /// Ticks from the finishing action to reaching the volume (negative).
    pub const FINALE_TICK_OFFSET: i32 = -852;
}

/// Start trigger: the player standing on a known spawn point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTrigger {
    pub map: String,
    pub spawn: [f32; 3],
    pub tolerance: f32,
    pub tick_offset: i32,
}

impl SpawnTrigger {
    /// True if every axis is within `tolerance` of the spawn point.
    pub fn matches(&self, position: Position) -> bool {
        [position.x, position.y, position.z]
            .iter()
            .zip(self.spawn.iter())
            .all(|(value, spawn)| (value - spawn).abs() <= self.tolerance)
    }
}

/// End trigger: a vertical cylinder open towards negative Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishVolume {
    pub map: String,
    pub center: [f32; 2],
    pub radius: f32,
    pub z_below: f32,
    pub tick_offset: i32,
}

impl FinishVolume {
    /// True if the XY distance to the centre is under `radius` and the
    /// position is below `z_below`.
    pub fn matches(&self, position: Position) -> bool {
        let dx = f64::from(position.x) - f64::from(self.center[0]);
        let dy = f64::from(position.y) - f64::from(self.center[1]);
        let radius = f64::from(self.radius);
        dx * dx + dy * dy < radius * radius && position.z < self.z_below
    }
}

/// Trigger table keyed by map name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    pub start: Vec<SpawnTrigger>,
    pub end: Vec<FinishVolume>,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            start: vec![SpawnTrigger {
                map: maps::FIRST_MAP.to_string(),
                spawn: defaults::INTRO_SPAWN,
                tolerance: defaults::INTRO_SPAWN_TOLERANCE,
                tick_offset: defaults::INTRO_TICK_OFFSET,
            }],
            end: vec![FinishVolume {
                map: maps::FINAL_MAP.to_string(),
                center: defaults::FINALE_CENTER,
                radius: defaults::FINALE_RADIUS,
                z_below: defaults::FINALE_Z_BELOW,
                tick_offset: defaults::FINALE_TICK_OFFSET,
            }],
        }
    }
}

impl Heuristics {
    /// A table without any triggers: every map uses naive ticks.
    pub fn none() -> Self {
        Self {
            start: Vec::new(),
            end: Vec::new(),
        }
    }

    /// Start trigger for the header's map (exact name match).
    pub fn start_for(&self, header: &Header) -> Option<&SpawnTrigger> {
        self.start.iter().find(|trigger| header.is_map(&trigger.map))
    }

    /// End trigger for the header's map (exact name match).
    pub fn end_for(&self, header: &Header) -> Option<&FinishVolume> {
        self.end.iter().find(|volume| header.is_map(&volume.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::mock::MockDemoBuilder;

    #[test]
    fn test_spawn_trigger_tolerance() {
        let trigger = &Heuristics::default().start[0];

        assert!(trigger.matches(Position::new(-8674.0, 1773.0, 28.0)));
        assert!(trigger.matches(Position::new(-8674.005, 1773.0, 28.0)));
        assert!(!trigger.matches(Position::new(-8674.0, 1773.0, 28.5)));
        assert!(!trigger.matches(Position::new(-8670.0, 1773.0, 28.0)));
    }

    #[test]
    fn test_finish_volume() {
        let volume = &Heuristics::default().end[0];

        // Centre, below the floor
        assert!(volume.matches(Position::new(54.1, 159.2, -300.0)));
        // Inside the radius, below the floor
        assert!(volume.matches(Position::new(54.1 + 30.0, 159.2 - 30.0, -250.0)));
        // Above the floor
        assert!(!volume.matches(Position::new(54.1, 159.2, -100.0)));
        // Outside the radius (distance 60)
        assert!(!volume.matches(Position::new(54.1 + 60.0, 159.2, -300.0)));
    }

    #[test]
    fn test_lookup_by_exact_map_name() {
        let heuristics = Heuristics::default();

        let intro = MockDemoBuilder::new("sp_a1_intro1");
        assert!(heuristics.start_for(intro.header()).is_some());
        assert!(heuristics.end_for(intro.header()).is_none());

        let finale = MockDemoBuilder::new("sp_a4_finale4");
        assert!(heuristics.start_for(finale.header()).is_none());
        assert!(heuristics.end_for(finale.header()).is_some());

        let other = MockDemoBuilder::new("sp_a1_intro10");
        assert!(heuristics.start_for(other.header()).is_none());
    }

    #[test]
    fn test_none_has_no_triggers() {
        let heuristics = Heuristics::none();
        let intro = MockDemoBuilder::new("sp_a1_intro1");
        assert!(heuristics.start_for(intro.header()).is_none());
    }
}
