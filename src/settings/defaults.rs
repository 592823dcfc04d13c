//! Built-in settings for every settings group.
//!
//! Stored rows are merged over these key by key, so a store only needs to hold
//! the values that differ.

use super::types::SettingRecord;
use crate::games::crossing::types as crossing;
use crate::games::flappy::types as flappy;
use std::collections::BTreeMap;

/// Portal-wide branding.
pub const PORTAL_KEY: &str = "portal";
/// Road Rush (lane-crossing game).
pub const CROSSING_KEY: &str = "crossing";
/// Sky Hopper (pipe game).
pub const FLAPPY_KEY: &str = "flappy";

pub const GROUP_KEYS: [&str; 3] = [PORTAL_KEY, CROSSING_KEY, FLAPPY_KEY];

pub fn defaults_for(group: &str) -> BTreeMap<String, SettingRecord> {
    let rows: Vec<(&str, SettingRecord)> = match group {
        PORTAL_KEY => vec![
            ("title", SettingRecord::text("Arcade")),
            ("accent_color", SettingRecord::color("#00BCD4")),
        ],
        CROSSING_KEY => vec![
            ("title", SettingRecord::text("Road Rush")),
            (
                "character_size",
                SettingRecord::number(crossing::DEFAULT_CHARACTER_SIZE, 10.0, 46.0, 1.0),
            ),
            ("character_color", SettingRecord::color("#FFD700")),
            (
                "move_step",
                SettingRecord::number(crossing::DEFAULT_MOVE_STEP, 5.0, 50.0, 1.0),
            ),
            (
                "car_size",
                SettingRecord::number(crossing::DEFAULT_CAR_SIZE, 10.0, 46.0, 1.0),
            ),
            (
                "car_speed",
                SettingRecord::number(crossing::DEFAULT_CAR_SPEED, 0.5, 10.0, 0.5),
            ),
            ("car_color", SettingRecord::color("#E53935")),
            (
                "spawn_interval",
                SettingRecord::number(crossing::DEFAULT_SPAWN_INTERVAL_MS, 200.0, 5000.0, 50.0),
            ),
            (
                "spawn_chance",
                SettingRecord::number(crossing::DEFAULT_SPAWN_CHANCE, 0.0, 1.0, 0.05),
            ),
            (
                "obstacle_size",
                SettingRecord::number(crossing::DEFAULT_OBSTACLE_SIZE, 10.0, 46.0, 1.0),
            ),
        ],
        FLAPPY_KEY => vec![
            ("title", SettingRecord::text("Sky Hopper")),
            (
                "gravity",
                SettingRecord::number(flappy::DEFAULT_GRAVITY, 0.1, 2.0, 0.1),
            ),
            (
                "jump_strength",
                SettingRecord::number(flappy::DEFAULT_JUMP_STRENGTH, 2.0, 20.0, 0.5),
            ),
            (
                "pipe_speed",
                SettingRecord::number(flappy::DEFAULT_PIPE_SPEED, 1.0, 10.0, 0.5),
            ),
            (
                "pipe_gap",
                SettingRecord::number(flappy::DEFAULT_PIPE_GAP, 80.0, 300.0, 5.0),
            ),
            (
                "pipe_width",
                SettingRecord::number(flappy::DEFAULT_PIPE_WIDTH, 20.0, 120.0, 5.0),
            ),
            (
                "pipe_interval",
                SettingRecord::number(flappy::DEFAULT_PIPE_INTERVAL_MS, 500.0, 5000.0, 100.0),
            ),
            (
                "spawn_chance",
                SettingRecord::number(flappy::DEFAULT_SPAWN_CHANCE, 0.1, 1.0, 0.05),
            ),
            (
                "difficulty",
                SettingRecord::number(flappy::DEFAULT_DIFFICULTY, 0.5, 3.0, 0.1),
            ),
            ("bird_color", SettingRecord::color("#FFEB3B")),
            ("pipe_color", SettingRecord::color("#4CAF50")),
        ],
        _ => Vec::new(),
    };

    rows.into_iter()
        .map(|(key, record)| (key.to_string(), record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_group_has_a_title() {
        for group in GROUP_KEYS {
            let defaults = defaults_for(group);
            assert!(defaults.contains_key("title"), "{group} has no title");
        }
    }

    #[test]
    fn test_unknown_group_is_empty() {
        assert!(defaults_for("pinball").is_empty());
    }

    #[test]
    fn test_defaults_are_usable_and_in_range() {
        for group in GROUP_KEYS {
            for (key, record) in defaults_for(group) {
                assert!(record.is_usable(), "{group}.{key} unusable");
                if let (Some(value), Some(min), Some(max)) =
                    (record.value.as_f64(), record.min, record.max)
                {
                    assert!(value >= min && value <= max, "{group}.{key} out of range");
                }
            }
        }
    }
}
