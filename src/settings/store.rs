//! Settings stores: where raw setting rows come from.

use super::defaults::{defaults_for, GROUP_KEYS};
use crate::utils::persistence::{load_json, save_json};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

/// File name of the settings document in the data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Raw rows for one settings group, keyed by setting key. Rows are left
/// undecoded; see [`super::types::decode_record`].
pub type SettingRows = HashMap<String, Value>;

/// Source of per-game settings rows.
pub trait SettingsStore {
    fn get(&self, group: &str) -> io::Result<SettingRows>;
}

/// On-disk document: `{ "<group>": { "<key>": <row>, ... }, ... }`.
type SettingsDocument = BTreeMap<String, BTreeMap<String, Value>>;

/// Settings kept in a single JSON file.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the built-in defaults if no settings file exists yet, so there is
    /// something to edit. Returns true if a file was written.
    pub fn seed_defaults(&self) -> io::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        let mut document = SettingsDocument::new();
        for group in GROUP_KEYS {
            let mut rows = BTreeMap::new();
            for (key, record) in defaults_for(group) {
                let row = serde_json::to_value(&record)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                rows.insert(key, row);
            }
            document.insert(group.to_string(), rows);
        }
        save_json(&self.path, &document)?;
        Ok(true)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, group: &str) -> io::Result<SettingRows> {
        let document: SettingsDocument = load_json(&self.path)?.unwrap_or_default();
        Ok(document
            .get(group)
            .map(|rows| rows.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}

/// In-memory store, used by tests and as an empty fallback.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    groups: HashMap<String, SettingRows>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: &str, key: &str, row: Value) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), row);
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, group: &str) -> io::Result<SettingRows> {
        Ok(self.groups.get(group).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::defaults::FLAPPY_KEY;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join(SETTINGS_FILE));
        assert!(store.get(FLAPPY_KEY).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{{{").unwrap();
        let store = JsonSettingsStore::new(path);
        assert!(store.get(FLAPPY_KEY).is_err());
    }

    #[test]
    fn test_reads_group_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            json!({"flappy": {"gravity": {"type": "number", "value": 0.9}}}).to_string(),
        )
        .unwrap();
        let store = JsonSettingsStore::new(path);
        let rows = store.get(FLAPPY_KEY).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["gravity"]["value"], json!(0.9));
        assert!(store.get("crossing").unwrap().is_empty());
    }

    #[test]
    fn test_seed_defaults_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join(SETTINGS_FILE));
        assert!(store.seed_defaults().unwrap());
        assert!(!store.seed_defaults().unwrap());
        let rows = store.get(FLAPPY_KEY).unwrap();
        assert_eq!(rows.len(), defaults_for(FLAPPY_KEY).len());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemorySettingsStore::new();
        store.insert("crossing", "car_speed", json!({"type": "number", "value": 4}));
        assert_eq!(store.get("crossing").unwrap().len(), 1);
        assert!(store.get("flappy").unwrap().is_empty());
    }
}
