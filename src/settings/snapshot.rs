//! Immutable per-session view of a settings group.

use super::defaults::defaults_for;
use super::store::{SettingRows, SettingsStore};
use super::types::{decode_record, Rgb, SettingRecord};
use std::collections::BTreeMap;

/// Settings for one group: built-in defaults with stored rows merged over
/// them key by key. Taken once when a session starts and never refreshed
/// while it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSnapshot {
    group: String,
    records: BTreeMap<String, SettingRecord>,
}

impl SettingsSnapshot {
    /// Built-in defaults only.
    pub fn defaults(group: &str) -> Self {
        Self {
            group: group.to_string(),
            records: defaults_for(group),
        }
    }

    /// Load a group from `store`. A failing store yields the defaults.
    pub fn load(store: &dyn SettingsStore, group: &str) -> Self {
        match store.get(group) {
            Ok(rows) => Self::merged(group, &rows),
            Err(e) => {
                log::warn!("settings for '{}' unavailable, using defaults: {}", group, e);
                Self::defaults(group)
            }
        }
    }

    /// Merge `rows` over the defaults. Rows that fail to decode, hold an
    /// unusable value, or change a known key's type are skipped. Bounds
    /// stored with a known key are ignored.
    pub fn merged(group: &str, rows: &SettingRows) -> Self {
        let mut snapshot = Self::defaults(group);
        for (key, raw) in rows {
            let Some(mut record) = decode_record(raw) else {
                log::warn!("{}.{}: undecodable setting row ignored", group, key);
                continue;
            };
            if let Some(default) = snapshot.records.get(key) {
                if default.kind != record.kind {
                    log::warn!(
                        "{}.{}: stored type {:?} does not match {:?}, ignored",
                        group,
                        key,
                        record.kind,
                        default.kind
                    );
                    continue;
                }
                // Built-in keys are always clamped to the built-in range.
                record.min = default.min;
                record.max = default.max;
                record.step = default.step;
            }
            if !record.is_usable() {
                log::warn!("{}.{}: unusable value ignored", group, key);
                continue;
            }
            snapshot.records.insert(key.clone(), record);
        }
        snapshot
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn get(&self, key: &str) -> Option<&SettingRecord> {
        self.records.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SettingRecord::as_number)
    }

    pub fn color(&self, key: &str) -> Option<Rgb> {
        self.get(key).and_then(SettingRecord::as_color)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingRecord::as_str)
    }

    /// All records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingRecord)> {
        self.records.iter()
    }

    /// The merged group as a JSON object of records.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.records).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::defaults::{CROSSING_KEY, FLAPPY_KEY};
    use crate::settings::store::MemorySettingsStore;
    use serde_json::{json, Value};
    use std::io;

    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn get(&self, _group: &str) -> io::Result<SettingRows> {
            Err(io::Error::new(io::ErrorKind::ConnectionRefused, "offline"))
        }
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemorySettingsStore::new();
        let snapshot = SettingsSnapshot::load(&store, FLAPPY_KEY);
        assert_eq!(snapshot, SettingsSnapshot::defaults(FLAPPY_KEY));
    }

    #[test]
    fn test_failing_store_gives_defaults() {
        let snapshot = SettingsSnapshot::load(&BrokenStore, CROSSING_KEY);
        assert_eq!(snapshot, SettingsSnapshot::defaults(CROSSING_KEY));
    }

    #[test]
    fn test_stored_rows_merge_per_key() {
        let mut store = MemorySettingsStore::new();
        store.insert(FLAPPY_KEY, "gravity", json!({"type": "number", "value": 0.9}));
        let snapshot = SettingsSnapshot::load(&store, FLAPPY_KEY);

        assert_eq!(snapshot.number("gravity"), Some(0.9));
        // Untouched keys keep their defaults.
        let defaults = SettingsSnapshot::defaults(FLAPPY_KEY);
        assert_eq!(snapshot.number("pipe_gap"), defaults.number("pipe_gap"));
        assert_eq!(snapshot.text("title"), Some("Sky Hopper"));
    }

    #[test]
    fn test_stored_row_inherits_default_bounds() {
        let mut store = MemorySettingsStore::new();
        store.insert(FLAPPY_KEY, "gravity", json!({"type": "number", "value": 50}));
        let snapshot = SettingsSnapshot::load(&store, FLAPPY_KEY);
        assert_eq!(snapshot.number("gravity"), Some(2.0));
    }

    #[test]
    fn test_stored_bounds_cannot_widen_known_key() {
        let mut store = MemorySettingsStore::new();
        store.insert(
            CROSSING_KEY,
            "obstacle_size",
            json!({"type": "number", "value": 0, "min": 0}),
        );
        store.insert(
            FLAPPY_KEY,
            "pipe_gap",
            json!({"type": "number", "value": 900, "max": 1000}),
        );
        let crossing = SettingsSnapshot::load(&store, CROSSING_KEY);
        let flappy = SettingsSnapshot::load(&store, FLAPPY_KEY);
        assert_eq!(crossing.number("obstacle_size"), Some(10.0));
        assert_eq!(flappy.number("pipe_gap"), Some(300.0));
        assert_eq!(crossing.get("obstacle_size").and_then(|r| r.min), Some(10.0));
    }

    #[test]
    fn test_string_encoded_rows() {
        let mut store = MemorySettingsStore::new();
        store.insert(
            CROSSING_KEY,
            "car_color",
            Value::String(r##"{"type":"color","value":"#0000FF"}"##.to_string()),
        );
        let snapshot = SettingsSnapshot::load(&store, CROSSING_KEY);
        assert_eq!(snapshot.color("car_color"), Some(Rgb(0, 0, 255)));
    }

    #[test]
    fn test_bad_rows_fall_back() {
        let mut store = MemorySettingsStore::new();
        store.insert(FLAPPY_KEY, "gravity", json!({"type": "color", "value": "#000000"}));
        store.insert(FLAPPY_KEY, "pipe_gap", json!("garbage"));
        store.insert(FLAPPY_KEY, "bird_color", json!({"type": "color", "value": "yellow"}));
        let snapshot = SettingsSnapshot::load(&store, FLAPPY_KEY);
        let defaults = SettingsSnapshot::defaults(FLAPPY_KEY);
        assert_eq!(snapshot, defaults);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let mut store = MemorySettingsStore::new();
        store.insert(FLAPPY_KEY, "motd", json!({"type": "text", "value": "hi"}));
        let snapshot = SettingsSnapshot::load(&store, FLAPPY_KEY);
        assert_eq!(snapshot.text("motd"), Some("hi"));
    }
}
