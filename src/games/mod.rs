//! The two portal games and what they share.

pub mod crossing;
pub mod flappy;
pub mod spawn;

pub use crossing::{CrossingConfig, CrossingGame};
pub use flappy::{FlappyConfig, FlappyGame};
pub use spawn::SpawnGate;

use std::fmt;

/// Session lifecycle shared by both games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Running,
    GameOver,
}

/// What a frame asks of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep the next frame scheduled.
    Continue,
    /// The session ended this frame; stop scheduling.
    GameOver,
}

/// A frame that cannot be completed. The session ends instead of resuming
/// from partial state.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Physics produced NaN or infinity.
    NonFinite(&'static str),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::NonFinite(what) => write!(f, "non-finite {}", what),
        }
    }
}

impl std::error::Error for FrameError {}

/// Fail with [`FrameError::NonFinite`] unless `value` is finite.
pub(crate) fn ensure_finite(value: f64, what: &'static str) -> Result<f64, FrameError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FrameError::NonFinite(what))
    }
}

/// The game currently on screen. Only one runs at a time.
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Crossing(CrossingGame),
    Flappy(FlappyGame),
}

impl ActiveGame {
    /// Settings group the game was configured from.
    pub fn key(&self) -> &'static str {
        match self {
            ActiveGame::Crossing(_) => crate::settings::CROSSING_KEY,
            ActiveGame::Flappy(_) => crate::settings::FLAPPY_KEY,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            ActiveGame::Crossing(game) => game.phase,
            ActiveGame::Flappy(game) => game.phase,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            ActiveGame::Crossing(game) => game.score,
            ActiveGame::Flappy(game) => game.score,
        }
    }

    pub fn best_score(&self) -> u32 {
        match self {
            ActiveGame::Crossing(game) => game.best_score,
            ActiveGame::Flappy(game) => game.best_score,
        }
    }

    /// Stop the frame loop, e.g. when leaving the scene.
    pub fn stop(&mut self) {
        match self {
            ActiveGame::Crossing(game) => game.scheduler.cancel(),
            ActiveGame::Flappy(game) => game.scheduler.cancel(),
        }
    }
}
