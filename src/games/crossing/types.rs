//! Road Rush data structures.

use crate::core::geometry::Rect;
use crate::core::scheduler::FrameScheduler;
use crate::games::spawn::SpawnGate;
use crate::games::GamePhase;
use crate::settings::{Rgb, SettingsSnapshot, CROSSING_KEY};
use rand::seq::SliceRandom;
use rand::Rng;

/// Play-field size in pixels.
pub const FIELD_WIDTH: f64 = 600.0;
pub const FIELD_HEIGHT: f64 = 600.0;

/// Height of every lane.
pub const LANE_HEIGHT: f64 = 50.0;

/// A forward move ending at or above this y completes the level.
pub const FINISH_LINE: f64 = LANE_HEIGHT;

/// Chance that a middle lane is a road rather than grass.
pub const ROAD_PROBABILITY: f64 = 0.6;

pub const DEFAULT_CHARACTER_SIZE: f64 = 30.0;
pub const DEFAULT_MOVE_STEP: f64 = 20.0;
pub const DEFAULT_CAR_SIZE: f64 = 30.0;
pub const DEFAULT_CAR_SPEED: f64 = 2.0;
pub const DEFAULT_SPAWN_INTERVAL_MS: f64 = 1000.0;
pub const DEFAULT_SPAWN_CHANCE: f64 = 0.5;
pub const DEFAULT_OBSTACLE_SIZE: f64 = 30.0;

pub const SCORE_PER_STEP: u32 = 10;
pub const SCORE_PER_LEVEL: u32 = 100;

/// Session configuration, fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingConfig {
    pub title: String,
    pub field_width: f64,
    pub field_height: f64,
    pub lane_height: f64,
    pub finish_line: f64,
    pub character_size: f64,
    pub character_color: Rgb,
    pub move_step: f64,
    pub car_size: f64,
    pub car_speed: f64,
    pub car_color: Rgb,
    pub spawn_interval_ms: f64,
    pub spawn_chance: f64,
    pub obstacle_size: f64,
}

impl CrossingConfig {
    pub fn from_snapshot(settings: &SettingsSnapshot) -> Self {
        Self {
            title: settings.text("title").unwrap_or("Road Rush").to_string(),
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            lane_height: LANE_HEIGHT,
            finish_line: FINISH_LINE,
            character_size: settings
                .number("character_size")
                .unwrap_or(DEFAULT_CHARACTER_SIZE),
            character_color: settings
                .color("character_color")
                .unwrap_or(Rgb(0xFF, 0xD7, 0x00)),
            move_step: settings.number("move_step").unwrap_or(DEFAULT_MOVE_STEP),
            car_size: settings.number("car_size").unwrap_or(DEFAULT_CAR_SIZE),
            car_speed: settings.number("car_speed").unwrap_or(DEFAULT_CAR_SPEED),
            car_color: settings.color("car_color").unwrap_or(Rgb(0xE5, 0x39, 0x35)),
            spawn_interval_ms: settings
                .number("spawn_interval")
                .unwrap_or(DEFAULT_SPAWN_INTERVAL_MS),
            spawn_chance: settings
                .number("spawn_chance")
                .unwrap_or(DEFAULT_SPAWN_CHANCE),
            obstacle_size: settings
                .number("obstacle_size")
                .unwrap_or(DEFAULT_OBSTACLE_SIZE),
        }
    }

    pub fn lane_count(&self) -> usize {
        ((self.field_height / self.lane_height).floor() as usize).max(3)
    }

    /// Top-left corner of the character at the start of a level: centered
    /// horizontally in the bottom lane.
    pub fn start_position(&self) -> (f64, f64) {
        let x = ((self.field_width - self.character_size) / 2.0).floor();
        let lane_top = self.field_height - self.lane_height;
        let y = lane_top + ((self.lane_height - self.character_size) / 2.0).max(0.0);
        (x, y)
    }
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self::from_snapshot(&SettingsSnapshot::defaults(CROSSING_KEY))
    }
}

/// Travel direction of the cars in a road lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(self) -> f64 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneKind {
    /// Top lane; reaching it completes the level.
    Goal,
    Road(Heading),
    Grass,
    /// Bottom lane where the character starts.
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    pub top: f64,
    pub kind: LaneKind,
}

impl Lane {
    pub fn heading(&self) -> Option<Heading> {
        match self.kind {
            LaneKind::Road(heading) => Some(heading),
            _ => None,
        }
    }
}

/// The player's square.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgb,
    pub alive: bool,
}

impl Character {
    pub fn new(config: &CrossingConfig) -> Self {
        let (x, y) = config.start_position();
        Self {
            x,
            y,
            size: config.character_size,
            color: config.character_color,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub heading: Heading,
    pub color: Rgb,
}

impl Car {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn advance(&mut self) {
        self.x += self.speed * self.heading.sign();
    }

    /// True once the car has fully left the field through the edge it drives
    /// toward.
    pub fn is_off_field(&self, field_width: f64) -> bool {
        match self.heading {
            Heading::Right => self.x >= field_width,
            Heading::Left => self.x + self.width <= 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Rock,
    Tree,
}

impl ObstacleKind {
    pub fn color(self) -> Rgb {
        match self {
            ObstacleKind::Rock => Rgb(0x75, 0x75, 0x75),
            ObstacleKind::Tree => Rgb(0x2E, 0x7D, 0x32),
        }
    }
}

/// A rock or tree. Never moves once placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }
}

/// Discrete move request. Only the four axis directions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward the goal lane.
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// Unit vector in field coordinates (y grows downward).
    pub fn delta(self) -> (f64, f64) {
        match self {
            MoveDirection::Up => (0.0, -1.0),
            MoveDirection::Down => (0.0, 1.0),
            MoveDirection::Left => (-1.0, 0.0),
            MoveDirection::Right => (1.0, 0.0),
        }
    }
}

/// What a move request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Game over; input ignored.
    Ignored,
    /// The field edge dropped the whole move.
    Stayed,
    /// Would overlap a rock or tree; nothing changed.
    Blocked,
    /// Moved without progress toward the goal.
    Moved,
    /// Moved toward the goal (+10).
    Advanced,
    /// Crossed the finish line (+100, next level).
    LevelComplete,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct CrossingGame {
    pub config: CrossingConfig,
    pub phase: GamePhase,
    pub character: Character,
    pub lanes: Vec<Lane>,
    pub obstacles: Vec<Obstacle>,
    pub cars: Vec<Car>,
    pub score: u32,
    pub level: u32,
    /// Best score of any session in this run, including the current one.
    pub best_score: u32,
    pub scheduler: FrameScheduler,
    pub spawn_gate: SpawnGate,
}

impl CrossingGame {
    /// Create a game on level 1 with a freshly generated layout.
    pub fn new<R: Rng>(config: CrossingConfig, rng: &mut R) -> Self {
        let lanes = generate_lanes(&config, rng);
        let obstacles = generate_obstacles(&config, &lanes, rng);
        Self {
            character: Character::new(&config),
            spawn_gate: SpawnGate::new(config.spawn_interval_ms),
            config,
            phase: GamePhase::NotStarted,
            lanes,
            obstacles,
            cars: Vec::new(),
            score: 0,
            level: 1,
            best_score: 0,
            scheduler: FrameScheduler::new(),
        }
    }

    /// Lay out lanes and rocks/trees for the current level.
    pub fn regenerate_layout<R: Rng>(&mut self, rng: &mut R) {
        self.lanes = generate_lanes(&self.config, rng);
        self.obstacles = generate_obstacles(&self.config, &self.lanes, rng);
    }

    /// Cooldown divisor for the current level.
    pub fn difficulty_multiplier(&self) -> f64 {
        1.0 + 0.25 * (self.level.saturating_sub(1)) as f64
    }

    /// Per-attempt spawn probability for the current level.
    pub fn spawn_probability(&self) -> f64 {
        (self.config.spawn_chance + 0.1 * (self.level.saturating_sub(1)) as f64).min(0.95)
    }

    /// Upper bound on cars spawned by one successful roll.
    pub fn max_cars_per_spawn(&self) -> usize {
        1 + (self.level.saturating_sub(1) as usize).min(2)
    }

    /// Spawn between one and [`Self::max_cars_per_spawn`] cars on distinct
    /// road lanes whose entry edge is clear. Returns how many spawned.
    pub fn spawn_cars<R: Rng>(&mut self, rng: &mut R) -> usize {
        let wanted = rng.gen_range(1..=self.max_cars_per_spawn());
        let car_width = self.config.car_size * 2.0;
        let open_lanes: Vec<Lane> = self
            .lanes
            .iter()
            .filter(|lane| lane.heading().is_some() && self.entry_is_clear(lane, car_width))
            .copied()
            .collect();

        let speed_scale = 1.0 + 0.2 * (self.level.saturating_sub(1)) as f64;
        let mut spawned = 0;
        for lane in open_lanes.choose_multiple(rng, wanted) {
            let Some(heading) = lane.heading() else {
                continue;
            };
            let height = self.config.car_size;
            let x = match heading {
                Heading::Right => -car_width,
                Heading::Left => self.config.field_width,
            };
            self.cars.push(Car {
                x,
                y: lane.top + ((self.config.lane_height - height) / 2.0).max(0.0),
                width: car_width,
                height,
                speed: self.config.car_speed * speed_scale * rng.gen_range(0.8..=1.2),
                heading,
                color: self.config.car_color,
            });
            spawned += 1;
        }
        spawned
    }

    /// True if no car in `lane` still overlaps the strip a new car would
    /// enter through.
    fn entry_is_clear(&self, lane: &Lane, car_width: f64) -> bool {
        let Some(heading) = lane.heading() else {
            return false;
        };
        let entry = match heading {
            Heading::Right => Rect::new(-car_width, lane.top, car_width * 2.0, self.config.lane_height),
            Heading::Left => Rect::new(
                self.config.field_width - car_width,
                lane.top,
                car_width * 2.0,
                self.config.lane_height,
            ),
        };
        !self.cars.iter().any(|car| car.rect().intersects(&entry))
    }
}

/// Goal lane on top, start lane at the bottom, and a random mix of roads and
/// grass between them with at least one road.
pub fn generate_lanes<R: Rng>(config: &CrossingConfig, rng: &mut R) -> Vec<Lane> {
    let count = config.lane_count();
    let mut lanes: Vec<Lane> = (0..count)
        .map(|i| {
            let kind = if i == 0 {
                LaneKind::Goal
            } else if i == count - 1 {
                LaneKind::Start
            } else if rng.gen_bool(ROAD_PROBABILITY) {
                LaneKind::Road(random_heading(rng))
            } else {
                LaneKind::Grass
            };
            Lane {
                top: i as f64 * config.lane_height,
                kind,
            }
        })
        .collect();

    if !lanes.iter().any(|lane| lane.heading().is_some()) {
        let index = rng.gen_range(1..count - 1);
        lanes[index].kind = LaneKind::Road(random_heading(rng));
    }
    lanes
}

fn random_heading<R: Rng>(rng: &mut R) -> Heading {
    if rng.gen_bool(0.5) {
        Heading::Left
    } else {
        Heading::Right
    }
}

/// Two or three rocks/trees per grass lane, each in its own horizontal slot so
/// they never overlap. Sizes below one pixel (or NaN) place nothing.
pub fn generate_obstacles<R: Rng>(
    config: &CrossingConfig,
    lanes: &[Lane],
    rng: &mut R,
) -> Vec<Obstacle> {
    let size = config.obstacle_size;
    if !(size >= 1.0) || config.field_width < size {
        return Vec::new();
    }
    let slot_count = ((config.field_width / (size * 2.0)).floor() as usize).max(3);
    let slot_width = config.field_width / slot_count as f64;
    let slots: Vec<usize> = (0..slot_count).collect();

    let mut obstacles = Vec::new();
    for lane in lanes.iter().filter(|lane| lane.kind == LaneKind::Grass) {
        let count = rng.gen_range(2..=3);
        let y = lane.top + ((config.lane_height - size) / 2.0).max(0.0);
        for &slot in slots.choose_multiple(rng, count) {
            let slack = (slot_width - size).max(0.0);
            let offset = if slack > 0.0 {
                rng.gen_range(0.0..slack)
            } else {
                0.0
            };
            let kind = if rng.gen_bool(0.5) {
                ObstacleKind::Rock
            } else {
                ObstacleKind::Tree
            };
            obstacles.push(Obstacle {
                x: (slot as f64 * slot_width + offset).floor(),
                y,
                size,
                kind,
            });
        }
    }
    obstacles
}
