//! Sky Hopper data structures.

use crate::core::geometry::Rect;
use crate::core::scheduler::FrameScheduler;
use crate::games::spawn::SpawnGate;
use crate::games::GamePhase;
use crate::settings::{Rgb, SettingsSnapshot, FLAPPY_KEY};
use rand::Rng;

/// Play-field size in pixels.
pub const FIELD_WIDTH: f64 = 400.0;
pub const FIELD_HEIGHT: f64 = 600.0;

/// The bird never moves horizontally; this is its left edge.
pub const BIRD_X: f64 = 80.0;
pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;

/// Shortest visible length of either pipe segment.
pub const MIN_PIPE_LENGTH: f64 = 50.0;

/// Frames that must pass after the run starts before the first pipe.
pub const MIN_SPAWN_FRAMES: u64 = 60;

/// Pipes are dropped once their right edge is this far past the left edge.
pub const CULL_MARGIN: f64 = 10.0;

/// Rotation (degrees) the bird snaps to on a jump.
pub const JUMP_TILT: f64 = -25.0;
/// Nose-down limit in degrees.
pub const MAX_ROTATION: f64 = 90.0;
/// Largest rotation change per frame.
pub const MAX_ROTATION_STEP: f64 = 4.0;
/// Degrees of rotation per unit of velocity per frame.
pub const ROTATION_PER_VELOCITY: f64 = 2.0;

/// Share of pipe pairs drawn with a decorative cap.
pub const DECORATIVE_CHANCE: f64 = 0.1;

pub const DEFAULT_GRAVITY: f64 = 0.6;
pub const DEFAULT_JUMP_STRENGTH: f64 = 10.0;
pub const DEFAULT_PIPE_SPEED: f64 = 3.0;
pub const DEFAULT_PIPE_GAP: f64 = 150.0;
pub const DEFAULT_PIPE_WIDTH: f64 = 60.0;
pub const DEFAULT_PIPE_INTERVAL_MS: f64 = 1500.0;
pub const DEFAULT_SPAWN_CHANCE: f64 = 1.0;
pub const DEFAULT_DIFFICULTY: f64 = 1.0;

/// Session configuration, fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct FlappyConfig {
    pub title: String,
    pub field_width: f64,
    pub field_height: f64,
    pub bird_x: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub gravity: f64,
    pub jump_strength: f64,
    pub pipe_speed: f64,
    pub pipe_gap: f64,
    pub pipe_width: f64,
    pub pipe_interval_ms: f64,
    pub spawn_chance: f64,
    /// Divides the pipe interval.
    pub difficulty: f64,
    pub bird_color: Rgb,
    pub pipe_color: Rgb,
}

impl FlappyConfig {
    pub fn from_snapshot(settings: &SettingsSnapshot) -> Self {
        Self {
            title: settings.text("title").unwrap_or("Sky Hopper").to_string(),
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: settings.number("gravity").unwrap_or(DEFAULT_GRAVITY),
            jump_strength: settings
                .number("jump_strength")
                .unwrap_or(DEFAULT_JUMP_STRENGTH),
            pipe_speed: settings.number("pipe_speed").unwrap_or(DEFAULT_PIPE_SPEED),
            pipe_gap: settings.number("pipe_gap").unwrap_or(DEFAULT_PIPE_GAP),
            pipe_width: settings.number("pipe_width").unwrap_or(DEFAULT_PIPE_WIDTH),
            pipe_interval_ms: settings
                .number("pipe_interval")
                .unwrap_or(DEFAULT_PIPE_INTERVAL_MS),
            spawn_chance: settings
                .number("spawn_chance")
                .unwrap_or(DEFAULT_SPAWN_CHANCE),
            difficulty: settings.number("difficulty").unwrap_or(DEFAULT_DIFFICULTY),
            bird_color: settings.color("bird_color").unwrap_or(Rgb(0xFF, 0xEB, 0x3B)),
            pipe_color: settings.color("pipe_color").unwrap_or(Rgb(0x4C, 0xAF, 0x50)),
        }
    }

    /// Lowest valid top edge for the bird.
    pub fn max_bird_y(&self) -> f64 {
        self.field_height - self.bird_height
    }
}

impl Default for FlappyConfig {
    fn default() -> Self {
        Self::from_snapshot(&SettingsSnapshot::defaults(FLAPPY_KEY))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Top edge in pixels; 0 is the ceiling.
    pub y: f64,
    /// Pixels per frame, positive is downward.
    pub velocity: f64,
    /// Degrees, positive is nose-down.
    pub rotation: f64,
}

impl Bird {
    /// Vertically centered and at rest.
    pub fn new(config: &FlappyConfig) -> Self {
        Self {
            y: (config.field_height - config.bird_height) / 2.0,
            velocity: 0.0,
            rotation: 0.0,
        }
    }
}

/// A top and bottom pipe sharing one x, leaving exactly `gap` pixels open.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub id: u64,
    pub x: f64,
    pub width: f64,
    pub gap: f64,
    pub top_height: f64,
    pub bottom_height: f64,
    pub decorative: bool,
}

impl PipePair {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.top_height + self.gap,
            self.width,
            self.bottom_height,
        )
    }

    /// y of the gap's upper and lower edge.
    pub fn gap_span(&self) -> (f64, f64) {
        (self.top_height, self.top_height + self.gap)
    }
}

/// Sound-worthy moments, drained by the scene after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Score,
    Collision,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub config: FlappyConfig,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: Vec<PipePair>,
    pub score: u32,
    /// Best score of any session in this run, including the current one.
    pub best_score: u32,
    /// A high score was stored for the current game over.
    pub submitted: bool,
    pub scheduler: FrameScheduler,
    pub spawn_gate: SpawnGate,
    pub cues: Vec<Cue>,
    next_pipe_id: u64,
}

impl FlappyGame {
    pub fn new(config: FlappyConfig) -> Self {
        Self {
            bird: Bird::new(&config),
            spawn_gate: SpawnGate::new(config.pipe_interval_ms),
            config,
            phase: GamePhase::NotStarted,
            pipes: Vec::new(),
            score: 0,
            best_score: 0,
            submitted: false,
            scheduler: FrameScheduler::new(),
            cues: Vec::new(),
            next_pipe_id: 0,
        }
    }

    pub fn bird_rect(&self) -> Rect {
        Rect::new(
            self.config.bird_x,
            self.bird.y,
            self.config.bird_width,
            self.config.bird_height,
        )
    }

    /// Take the cues raised since the last call.
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Spawn one pipe pair at the right edge. The top height is uniform over
    /// the range that leaves both segments at least [`MIN_PIPE_LENGTH`] long.
    /// A gap wider than the field allows is narrowed to fit; a non-positive
    /// gap or pipe width spawns nothing and returns false.
    pub fn spawn_pipe<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !(self.config.pipe_gap > 0.0) || !(self.config.pipe_width > 0.0) {
            return false;
        }
        let gap = self
            .config
            .pipe_gap
            .min(self.config.field_height - 2.0 * MIN_PIPE_LENGTH);
        if gap <= 0.0 {
            return false;
        }
        let min_top = MIN_PIPE_LENGTH;
        let max_top = self.config.field_height - gap - MIN_PIPE_LENGTH;
        let top_height = if max_top > min_top {
            rng.gen_range(min_top..=max_top)
        } else {
            min_top
        };

        self.pipes.push(PipePair {
            id: self.next_pipe_id,
            x: self.config.field_width,
            width: self.config.pipe_width,
            gap,
            top_height,
            bottom_height: self.config.field_height - top_height - gap,
            decorative: rng.gen_bool(DECORATIVE_CHANCE),
        });
        self.next_pipe_id += 1;
        true
    }
}
