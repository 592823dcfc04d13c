//! Road Rush game logic: movement, frame loop, collisions.

use super::types::*;
use crate::core::geometry::Rect;
use crate::games::{ensure_finite, FrameError, FrameOutcome, GamePhase};
use rand::Rng;

/// UI-agnostic input actions for Road Rush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingInput {
    Move(MoveDirection),
    /// Space/Enter: start, or restart after game over.
    Confirm,
    Other,
}

/// Process player input. Returns the move outcome for move inputs.
pub fn process_input<R: Rng>(
    game: &mut CrossingGame,
    input: CrossingInput,
    rng: &mut R,
) -> Option<MoveOutcome> {
    match input {
        CrossingInput::Move(direction) => Some(try_move(game, direction, rng)),
        CrossingInput::Confirm => {
            match game.phase {
                GamePhase::NotStarted => start(game),
                GamePhase::GameOver => reset(game, rng),
                GamePhase::Running => {}
            }
            None
        }
        CrossingInput::Other => None,
    }
}

/// NotStarted -> Running. Arms the frame scheduler.
pub fn start(game: &mut CrossingGame) {
    if game.phase == GamePhase::NotStarted {
        game.phase = GamePhase::Running;
        game.scheduler.schedule();
    }
}

/// Candidate position after a move, with each axis dropped independently if
/// it would leave the field.
fn clamped_target(game: &CrossingGame, direction: MoveDirection) -> (f64, f64) {
    let (dx, dy) = direction.delta();
    let step = game.config.move_step;
    let size = game.character.size;
    let max_x = game.config.field_width - size;
    let max_y = game.config.field_height - size;

    let mut x = game.character.x;
    let mut y = game.character.y;
    let next_x = x + dx * step;
    if (0.0..=max_x).contains(&next_x) {
        x = next_x;
    }
    let next_y = y + dy * step;
    if (0.0..=max_y).contains(&next_y) {
        y = next_y;
    }
    (x, y)
}

/// Move the character one step. Moves into a rock or tree are rejected with
/// no state change. A move in NotStarted starts the game first.
pub fn try_move<R: Rng>(game: &mut CrossingGame, direction: MoveDirection, rng: &mut R) -> MoveOutcome {
    match game.phase {
        GamePhase::GameOver => return MoveOutcome::Ignored,
        GamePhase::NotStarted => start(game),
        GamePhase::Running => {}
    }

    let (x, y) = clamped_target(game, direction);
    if x == game.character.x && y == game.character.y {
        return MoveOutcome::Stayed;
    }

    let target = Rect::square(x, y, game.character.size);
    if game.obstacles.iter().any(|o| o.rect().intersects(&target)) {
        return MoveOutcome::Blocked;
    }

    let forward = y < game.character.y;
    game.character.x = x;
    game.character.y = y;

    if !forward {
        return MoveOutcome::Moved;
    }
    if y <= game.config.finish_line {
        complete_level(game, rng);
        MoveOutcome::LevelComplete
    } else {
        game.score += SCORE_PER_STEP;
        game.best_score = game.best_score.max(game.score);
        MoveOutcome::Advanced
    }
}

/// Award the level bonus and set up the next, harder level.
fn complete_level<R: Rng>(game: &mut CrossingGame, rng: &mut R) {
    game.level += 1;
    game.score += SCORE_PER_LEVEL;
    game.best_score = game.best_score.max(game.score);
    let (x, y) = game.config.start_position();
    game.character.x = x;
    game.character.y = y;
    game.cars.clear();
    game.regenerate_layout(rng);
    log::debug!("road rush: level {} reached, score {}", game.level, game.score);
}

/// Advance Road Rush by `dt_ms` of wall time. Runs every frame that falls due
/// while the scheduler is armed. Returns true if any frame ran.
pub fn tick<R: Rng>(game: &mut CrossingGame, dt_ms: u64, rng: &mut R) -> bool {
    if game.phase != GamePhase::Running {
        return false;
    }
    game.scheduler.feed(dt_ms);

    let mut ran = false;
    while let Some(now_ms) = game.scheduler.next_frame() {
        ran = true;
        match step_frame(game, now_ms, rng) {
            Ok(FrameOutcome::Continue) => {}
            Ok(FrameOutcome::GameOver) => {
                game.scheduler.cancel();
                break;
            }
            Err(e) => {
                log::error!("road rush frame aborted: {}", e);
                end_game(game);
                game.scheduler.cancel();
                break;
            }
        }
    }
    ran
}

/// One frame: move cars, cull, maybe spawn, then test collisions.
pub fn step_frame<R: Rng>(
    game: &mut CrossingGame,
    now_ms: u64,
    rng: &mut R,
) -> Result<FrameOutcome, FrameError> {
    for car in &mut game.cars {
        car.advance();
        ensure_finite(car.x, "car position")?;
    }

    let field_width = game.config.field_width;
    game.cars.retain(|car| !car.is_off_field(field_width));

    let multiplier = game.difficulty_multiplier();
    if game.spawn_gate.ready(now_ms, multiplier) {
        game.spawn_gate.mark(now_ms);
        if rng.gen::<f64>() < game.spawn_probability() {
            game.spawn_cars(rng);
        }
    }

    if check_collision(game) {
        end_game(game);
        return Ok(FrameOutcome::GameOver);
    }
    Ok(FrameOutcome::Continue)
}

/// True if the character overlaps any car. Rocks and trees are handled by
/// move rejection instead.
pub fn check_collision(game: &CrossingGame) -> bool {
    let hitbox = game.character.rect();
    game.cars.iter().any(|car| car.rect().intersects(&hitbox))
}

fn end_game(game: &mut CrossingGame) {
    game.phase = GamePhase::GameOver;
    game.character.alive = false;
    game.best_score = game.best_score.max(game.score);
    log::info!(
        "road rush over: score {} on level {}",
        game.score,
        game.level
    );
}

/// Start a fresh session on level 1 with a new layout. Safe to call twice.
pub fn reset<R: Rng>(game: &mut CrossingGame, rng: &mut R) {
    game.character = Character::new(&game.config);
    game.cars.clear();
    game.score = 0;
    game.level = 1;
    game.regenerate_layout(rng);
    game.spawn_gate.reset();
    game.scheduler.restart();
    game.phase = GamePhase::Running;
    game.scheduler.schedule();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rgb;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// A running game with no obstacles and no roads, so nothing interferes.
    fn open_field() -> (CrossingGame, ChaCha8Rng) {
        let mut rng = rng();
        let mut game = CrossingGame::new(CrossingConfig::default(), &mut rng);
        game.obstacles.clear();
        start(&mut game);
        (game, rng)
    }

    fn car_at(x: f64, y: f64, heading: Heading) -> Car {
        Car {
            x,
            y,
            width: 60.0,
            height: 30.0,
            speed: 2.0,
            heading,
            color: Rgb(255, 0, 0),
        }
    }

    #[test]
    fn test_move_rejected_by_overlapping_obstacle() {
        let (mut game, mut rng) = open_field();
        game.character.x = 100.0;
        game.character.y = 100.0;
        game.obstacles.push(Obstacle {
            x: 100.0,
            y: 100.0,
            size: 30.0,
            kind: ObstacleKind::Rock,
        });
        let score = game.score;

        let outcome = try_move(&mut game, MoveDirection::Up, &mut rng);

        assert_eq!(outcome, MoveOutcome::Blocked);
        assert_eq!((game.character.x, game.character.y), (100.0, 100.0));
        assert_eq!(game.score, score);
    }

    #[test]
    fn test_reaching_finish_line_advances_level() {
        let (mut game, mut rng) = open_field();
        game.character.y = 65.0;
        game.score = 30;

        let outcome = try_move(&mut game, MoveDirection::Up, &mut rng);

        assert_eq!(outcome, MoveOutcome::LevelComplete);
        assert_eq!(game.level, 2);
        assert_eq!(game.score, 130);
        let (x, y) = game.config.start_position();
        assert_eq!((game.character.x, game.character.y), (x, y));
        assert!(game.character.y > game.config.field_height - game.config.lane_height);
    }

    #[test]
    fn test_forward_move_scores_ten() {
        let (mut game, mut rng) = open_field();
        let y = game.character.y;
        assert_eq!(try_move(&mut game, MoveDirection::Up, &mut rng), MoveOutcome::Advanced);
        assert_eq!(game.score, 10);
        assert!((game.character.y - (y - 20.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backward_and_lateral_moves_do_not_score() {
        let (mut game, mut rng) = open_field();
        game.character.y = 300.0;
        assert_eq!(try_move(&mut game, MoveDirection::Down, &mut rng), MoveOutcome::Moved);
        assert_eq!(try_move(&mut game, MoveDirection::Left, &mut rng), MoveOutcome::Moved);
        assert_eq!(try_move(&mut game, MoveDirection::Right, &mut rng), MoveOutcome::Moved);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_move_off_field_is_dropped() {
        let (mut game, mut rng) = open_field();
        game.character.x = 5.0;
        assert_eq!(try_move(&mut game, MoveDirection::Left, &mut rng), MoveOutcome::Stayed);
        assert!((game.character.x - 5.0).abs() < f64::EPSILON);

        game.character.y = game.config.field_height - game.character.size;
        assert_eq!(try_move(&mut game, MoveDirection::Down, &mut rng), MoveOutcome::Stayed);
    }

    #[test]
    fn test_first_move_starts_game() {
        let mut rng = rng();
        let mut game = CrossingGame::new(CrossingConfig::default(), &mut rng);
        game.obstacles.clear();
        assert_eq!(game.phase, GamePhase::NotStarted);
        try_move(&mut game, MoveDirection::Left, &mut rng);
        assert_eq!(game.phase, GamePhase::Running);
        assert!(game.scheduler.is_scheduled());
    }

    #[test]
    fn test_moves_ignored_after_game_over() {
        let (mut game, mut rng) = open_field();
        game.phase = GamePhase::GameOver;
        let before = game.character.clone();
        assert_eq!(try_move(&mut game, MoveDirection::Up, &mut rng), MoveOutcome::Ignored);
        assert_eq!(game.character, before);
    }

    #[test]
    fn test_cars_advance_and_cull_independently() {
        let (mut game, mut rng) = open_field();
        game.lanes.iter_mut().for_each(|l| {
            if l.heading().is_some() {
                l.kind = LaneKind::Grass;
            }
        });
        game.cars.push(car_at(599.0, 100.0, Heading::Right));
        game.cars.push(car_at(-58.5, 200.0, Heading::Left));
        game.cars.push(car_at(300.0, 300.0, Heading::Right));

        step_frame(&mut game, 16, &mut rng).unwrap();

        assert_eq!(game.cars.len(), 1);
        assert!((game.cars[0].x - 302.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_collision_with_car_ends_game() {
        let (mut game, mut rng) = open_field();
        let (x, y) = (game.character.x, game.character.y);
        game.cars.push(car_at(x - 10.0, y, Heading::Right));

        let changed = tick(&mut game, 16, &mut rng);

        assert!(changed);
        assert_eq!(game.phase, GamePhase::GameOver);
        assert!(!game.character.alive);
        assert!(!game.scheduler.is_scheduled());
        // Nothing runs after game over.
        assert!(!tick(&mut game, 100, &mut rng));
    }

    #[test]
    fn test_obstacle_contact_is_not_a_collision() {
        let (mut game, _) = open_field();
        game.obstacles.push(Obstacle {
            x: game.character.x,
            y: game.character.y,
            size: 30.0,
            kind: ObstacleKind::Tree,
        });
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_traffic_appears_over_time() {
        let (mut game, mut rng) = open_field();
        game.config.spawn_chance = 1.0;
        // The character stays in the start lane, which no road crosses.
        for _ in 0..200 {
            tick(&mut game, 16, &mut rng);
        }
        assert_eq!(game.scheduler.frame_count(), 200);
        assert_eq!(game.phase, GamePhase::Running);
        assert!(!game.cars.is_empty());
    }

    #[test]
    fn test_no_spawn_before_cooldown() {
        let (mut game, mut rng) = open_field();
        game.config.spawn_chance = 1.0;
        for _ in 0..30 {
            tick(&mut game, 16, &mut rng);
        }
        assert!(game.cars.is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut game, mut rng) = open_field();
        game.score = 250;
        game.level = 3;
        game.cars.push(car_at(10.0, 100.0, Heading::Right));
        game.phase = GamePhase::GameOver;
        game.character.alive = false;

        reset(&mut game, &mut rng);
        let once = (game.score, game.level, game.cars.len(), game.phase, game.character.clone());
        reset(&mut game, &mut rng);
        let twice = (game.score, game.level, game.cars.len(), game.phase, game.character.clone());

        assert_eq!(once, twice);
        assert_eq!(game.score, 0);
        assert_eq!(game.level, 1);
        assert!(game.cars.is_empty());
        assert_eq!(game.phase, GamePhase::Running);
        assert!(game.character.alive);
        assert!(game.scheduler.is_scheduled());
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let (mut game, mut rng) = open_field();
        try_move(&mut game, MoveDirection::Up, &mut rng);
        assert_eq!(game.best_score, 10);
        reset(&mut game, &mut rng);
        assert_eq!(game.best_score, 10);
    }

    #[test]
    fn test_confirm_input_transitions() {
        let mut rng = rng();
        let mut game = CrossingGame::new(CrossingConfig::default(), &mut rng);
        process_input(&mut game, CrossingInput::Confirm, &mut rng);
        assert_eq!(game.phase, GamePhase::Running);
        game.phase = GamePhase::GameOver;
        game.score = 40;
        process_input(&mut game, CrossingInput::Confirm, &mut rng);
        assert_eq!(game.phase, GamePhase::Running);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_non_finite_car_aborts_session() {
        let (mut game, mut rng) = open_field();
        let mut car = car_at(100.0, 100.0, Heading::Right);
        car.speed = f64::NAN;
        game.cars.push(car);
        tick(&mut game, 16, &mut rng);
        assert_eq!(game.phase, GamePhase::GameOver);
        assert!(!game.scheduler.is_scheduled());
    }
}
