//! Leaderboard entries and submission errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Entries kept on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 3;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 16;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
    /// Identity that wrote the row.
    pub identity: String,
    /// Unix timestamp (seconds) of the submission.
    #[serde(default)]
    pub created_at: i64,
}

/// Result of a submission that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Written at 1-based `rank`, possibly evicting the previous minimum.
    Accepted { rank: usize, evicted: Option<u32> },
    /// The board already holds three better-or-equal scores; nothing written.
    Rejected { lowest: u32 },
}

#[derive(Debug)]
pub enum ScoreError {
    EmptyUsername,
    /// A score was already submitted for this game-over.
    AlreadySubmitted,
    /// The game is still running.
    GameNotOver,
    /// No writable identity could be provisioned.
    Identity(String),
    Io(io::Error),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::EmptyUsername => write!(f, "enter a name first"),
            ScoreError::AlreadySubmitted => write!(f, "score already submitted"),
            ScoreError::GameNotOver => write!(f, "game is still running"),
            ScoreError::Identity(reason) => write!(f, "could not create player identity: {}", reason),
            ScoreError::Io(e) => write!(f, "score store unavailable: {}", e),
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ScoreError {
    fn from(e: io::Error) -> Self {
        ScoreError::Io(e)
    }
}

/// Trim and length-limit a username. Returns `None` if nothing is left.
pub fn normalize_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_USERNAME_LEN).collect())
}
