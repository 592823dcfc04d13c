//! Score stores.

use super::types::ScoreEntry;
use crate::utils::persistence::{load_json, save_json};
use std::io;
use std::path::{Path, PathBuf};

/// File name of the leaderboard in the data directory.
pub const SCORES_FILE: &str = "scores.json";

/// Ranked storage of `(username, score)` rows.
pub trait ScoreStore {
    /// Up to `limit` entries, highest score first. Equal scores keep
    /// insertion order.
    fn list(&self, limit: usize) -> io::Result<Vec<ScoreEntry>>;

    fn insert(&mut self, entry: ScoreEntry) -> io::Result<()>;

    /// Remove one entry holding `score`. Returns false if none matched.
    fn delete_by_score(&mut self, score: u32) -> io::Result<bool>;
}

fn ranked(mut entries: Vec<ScoreEntry>, limit: usize) -> Vec<ScoreEntry> {
    // Stable sort keeps earlier submissions ahead on ties.
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(limit);
    entries
}

/// Removes the most recently inserted entry with `score`, which is the one
/// ranked last among equals.
fn remove_last_with_score(entries: &mut Vec<ScoreEntry>, score: u32) -> bool {
    match entries.iter().rposition(|e| e.score == score) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}

/// Leaderboard persisted as a JSON array.
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> io::Result<Vec<ScoreEntry>> {
        Ok(load_json(&self.path)?.unwrap_or_default())
    }
}

impl ScoreStore for JsonScoreStore {
    fn list(&self, limit: usize) -> io::Result<Vec<ScoreEntry>> {
        Ok(ranked(self.read_all()?, limit))
    }

    fn insert(&mut self, entry: ScoreEntry) -> io::Result<()> {
        let mut entries = self.read_all()?;
        entries.push(entry);
        save_json(&self.path, &entries)
    }

    fn delete_by_score(&mut self, score: u32) -> io::Result<bool> {
        let mut entries = self.read_all()?;
        let removed = remove_last_with_score(&mut entries, score);
        if removed {
            save_json(&self.path, &entries)?;
        }
        Ok(removed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    entries: Vec<ScoreEntry>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw row count, including anything beyond the listing limit.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn list(&self, limit: usize) -> io::Result<Vec<ScoreEntry>> {
        Ok(ranked(self.entries.clone(), limit))
    }

    fn insert(&mut self, entry: ScoreEntry) -> io::Result<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn delete_by_score(&mut self, score: u32) -> io::Result<bool> {
        Ok(remove_last_with_score(&mut self.entries, score))
    }
}
