//! JSON persistence helpers for files under the arcade data directory.
//!
//! The directory is `~/.arcade/` unless `ARCADE_HOME` points elsewhere.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "ARCADE_HOME";

/// Get the data directory, creating it if needed.
pub fn arcade_dir() -> io::Result<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not determine home directory",
                )
            })?
            .join(".arcade"),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path of a file in the data directory.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(arcade_dir()?.join(filename))
}

/// Load JSON from `path`, returning `T::default()` if the file is missing or
/// does not parse.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Load JSON from `path`. A missing file is `Ok(None)`; a malformed one is an
/// `InvalidData` error.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let val: Vec<String> = load_json_or_default(&dir.path().join("nope.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_malformed_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let val: Vec<u32> = load_json_or_default(&path);
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_json_distinguishes_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing: Option<Vec<u32>> = load_json(&dir.path().join("missing.json")).unwrap();
        assert!(missing.is_none());

        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2").unwrap();
        let err = load_json::<Vec<u32>>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        save_json(&path, &vec![1u32, 2, 3]).unwrap();
        let loaded: Vec<u32> = load_json_or_default(&path);
        assert_eq!(loaded, vec![1, 2, 3]);
    }
}
