//! Single-player map list in run order.

/// Map a full run starts on.
pub const FIRST_MAP: &str = "sp_a1_intro1";

/// Last map with gameplay; the run ends on it.
pub const FINAL_MAP: &str = "sp_a4_finale4";

/// Every single-player map with its chapter number, in run order.
pub const MAPS: &[(&str, u8)] = &[
    ("sp_a1_intro1", 1),
    ("sp_a1_intro2", 1),
    ("sp_a1_intro3", 1),
    ("sp_a1_intro4", 1),
    ("sp_a1_intro5", 1),
    ("sp_a1_intro6", 1),
    ("sp_a1_intro7", 1),
    ("sp_a1_wakeup", 1),
    ("sp_a2_intro", 1),
    ("sp_a2_laser_intro", 2),
    ("sp_a2_laser_stairs", 2),
    ("sp_a2_dual_lasers", 2),
    ("sp_a2_laser_over_goo", 2),
    ("sp_a2_catapult_intro", 2),
    ("sp_a2_trust_fling", 2),
    ("sp_a2_pit_flings", 2),
    ("sp_a2_fizzler_intro", 2),
    ("sp_a2_sphere_peek", 3),
    ("sp_a2_ricochet", 3),
    ("sp_a2_bridge_intro", 3),
    ("sp_a2_bridge_the_gap", 3),
    ("sp_a2_turret_intro", 3),
    ("sp_a2_laser_relays", 3),
    ("sp_a2_turret_blocker", 3),
    ("sp_a2_laser_vs_turret", 3),
    ("sp_a2_pull_the_rug", 3),
    ("sp_a2_column_blocker", 4),
    ("sp_a2_laser_chaining", 4),
    ("sp_a2_triple_laser", 4),
    ("sp_a2_bts1", 4),
    ("sp_a2_bts2", 4),
    ("sp_a2_bts3", 5),
    ("sp_a2_bts4", 5),
    ("sp_a2_bts5", 5),
    ("sp_a2_bts6", 5),
    ("sp_a2_core", 5),
    ("sp_a3_00", 6),
    ("sp_a3_01", 6),
    ("sp_a3_03", 6),
    ("sp_a3_jump_intro", 6),
    ("sp_a3_bomb_flings", 6),
    ("sp_a3_crazy_box", 6),
    ("sp_a3_transition01", 6),
    ("sp_a3_speed_ramp", 7),
    ("sp_a3_speed_flings", 7),
    ("sp_a3_portal_intro", 7),
    ("sp_a3_end", 7),
    ("sp_a4_intro", 8),
    ("sp_a4_tb_intro", 8),
    ("sp_a4_tb_trust_drop", 8),
    ("sp_a4_tb_wall_button", 8),
    ("sp_a4_tb_polarity", 8),
    ("sp_a4_tb_catch", 8),
    ("sp_a4_stop_the_box", 8),
    ("sp_a4_laser_catapult", 8),
    ("sp_a4_laser_platform", 8),
    ("sp_a4_speed_tb_catch", 8),
    ("sp_a4_jump_polarity", 8),
    ("sp_a4_finale1", 9),
    ("sp_a4_finale2", 9),
    ("sp_a4_finale3", 9),
    ("sp_a4_finale4", 9),
    ("sp_a5_credits", 9),
];

const CHAPTER_NAMES: [&str; 9] = [
    "The Courtesy Call",
    "The Cold Boot",
    "The Return",
    "The Surprise",
    "The Escape",
    "The Fall",
    "The Reunion",
    "The Itch",
    "The Part Where He Kills You",
];

/// Position of `map` in run order.
pub fn map_index(map: &str) -> Option<usize> {
    MAPS.iter().position(|(name, _)| *name == map)
}

pub fn chapter_of(map: &str) -> Option<u8> {
    MAPS.iter()
        .find(|(name, _)| *name == map)
        .map(|(_, chapter)| *chapter)
}

/// Chapter title for a 1-based chapter number.
pub fn chapter_name(chapter: u8) -> Option<&'static str> {
    CHAPTER_NAMES.get(usize::from(chapter).checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_final_maps() {
        assert_eq!(map_index(FIRST_MAP), Some(0));
        assert_eq!(MAPS.last().map(|(name, _)| *name), Some("sp_a5_credits"));
        assert_eq!(map_index(FINAL_MAP), Some(MAPS.len() - 2));
    }

    #[test]
    fn test_chapter_lookup() {
        assert_eq!(chapter_of("sp_a2_intro"), Some(1));
        assert_eq!(chapter_of("sp_a3_end"), Some(7));
        assert_eq!(chapter_of("mp_coop_lobby_2"), None);
        assert_eq!(chapter_name(1), Some("The Courtesy Call"));
        assert_eq!(chapter_name(0), None);
        assert_eq!(chapter_name(10), None);
    }

    #[test]
    fn test_chapters_are_ordered() {
        assert!(MAPS.windows(2).all(|pair| pair[0].1 <= pair[1].1));
        assert_eq!(MAPS.len(), 63);
        assert_eq!(map_index("sp_a4_tb_catch"), Some(49));
    }
}
