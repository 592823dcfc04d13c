//! Sky Hopper game logic: jump, frame loop, scoring, high scores.

use super::types::*;
use crate::games::{ensure_finite, FrameError, FrameOutcome, GamePhase};
use crate::scores::{submit_score, IdentityProvider, ScoreError, ScoreStore, SubmitOutcome};
use rand::Rng;

/// UI-agnostic input actions for Sky Hopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlappyInput {
    /// Space/Up: flap, and start the run from NotStarted.
    Jump,
    /// Tab after game over.
    Restart,
    Other,
}

/// Process player input. Returns true if the game state changed.
pub fn process_input(game: &mut FlappyGame, input: FlappyInput) -> bool {
    match input {
        FlappyInput::Jump => jump(game),
        FlappyInput::Restart if game.phase == GamePhase::GameOver => {
            reset(game);
            true
        }
        FlappyInput::Restart | FlappyInput::Other => false,
    }
}

/// Flap. NotStarted -> Running on the first jump. No-op after game over.
pub fn jump(game: &mut FlappyGame) -> bool {
    match game.phase {
        GamePhase::GameOver => return false,
        GamePhase::NotStarted => {
            game.phase = GamePhase::Running;
            game.scheduler.schedule();
        }
        GamePhase::Running => {}
    }
    game.bird.velocity = -game.config.jump_strength;
    game.bird.rotation = JUMP_TILT;
    game.cues.push(Cue::Jump);
    true
}

/// Advance Sky Hopper by `dt_ms` of wall time. Returns true if any frame ran.
pub fn tick<R: Rng>(game: &mut FlappyGame, dt_ms: u64, rng: &mut R) -> bool {
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
                log::error!("sky hopper frame aborted: {}", e);
                end_game(game);
                game.scheduler.cancel();
                break;
            }
        }
    }
    ran
}

/// One frame: integrate the bird, bounds check, scroll and score pipes,
/// maybe spawn, then test collisions.
pub fn step_frame<R: Rng>(
    game: &mut FlappyGame,
    now_ms: u64,
    rng: &mut R,
) -> Result<FrameOutcome, FrameError> {
    let bird = &mut game.bird;
    bird.velocity = ensure_finite(bird.velocity + game.config.gravity, "bird velocity")?;
    let candidate = ensure_finite(bird.y + bird.velocity, "bird position")?;
    let step = (bird.velocity * ROTATION_PER_VELOCITY).min(MAX_ROTATION_STEP);
    bird.rotation = (bird.rotation + step).clamp(JUMP_TILT, MAX_ROTATION);

    if candidate < 0.0 || candidate > game.config.max_bird_y() {
        game.cues.push(Cue::Collision);
        end_game(game);
        return Ok(FrameOutcome::GameOver);
    }
    game.bird.y = candidate;

    let bird_x = game.config.bird_x;
    let speed = game.config.pipe_speed;
    let mut passed = 0;
    for pipe in &mut game.pipes {
        let before = pipe.right();
        pipe.x = ensure_finite(pipe.x - speed, "pipe position")?;
        if before >= bird_x && pipe.right() < bird_x {
            passed += 1;
        }
    }
    game.pipes.retain(|pipe| pipe.right() >= -CULL_MARGIN);

    for _ in 0..passed {
        game.score += 1;
        game.cues.push(Cue::Score);
    }
    game.best_score = game.best_score.max(game.score);

    if game.scheduler.frame_count() >= MIN_SPAWN_FRAMES
        && game.spawn_gate.ready(now_ms, game.config.difficulty)
    {
        game.spawn_gate.mark(now_ms);
        if rng.gen::<f64>() < game.config.spawn_chance {
            game.spawn_pipe(rng);
        }
    }

    if check_collision(game) {
        game.cues.push(Cue::Collision);
        end_game(game);
        return Ok(FrameOutcome::GameOver);
    }
    Ok(FrameOutcome::Continue)
}

/// True if the bird overlaps the top or bottom segment of any pipe pair.
pub fn check_collision(game: &FlappyGame) -> bool {
    let hitbox = game.bird_rect();
    game.pipes
        .iter()
        .any(|pipe| pipe.top_rect().intersects(&hitbox) || pipe.bottom_rect().intersects(&hitbox))
}

fn end_game(game: &mut FlappyGame) {
    game.phase = GamePhase::GameOver;
    game.best_score = game.best_score.max(game.score);
    log::info!("sky hopper over: score {}", game.score);
}

/// Back to NotStarted with a centered bird. The best score survives.
pub fn reset(game: &mut FlappyGame) {
    game.bird = Bird::new(&game.config);
    game.pipes.clear();
    game.score = 0;
    game.submitted = false;
    game.cues.clear();
    game.spawn_gate.reset();
    game.scheduler.restart();
    game.phase = GamePhase::NotStarted;
}

/// Store the finished game's score under `username`. Allowed once per game
/// over; a rejected score does not use up the attempt.
pub fn submit_high_score(
    game: &mut FlappyGame,
    store: &mut dyn ScoreStore,
    identities: &mut dyn IdentityProvider,
    username: &str,
) -> Result<SubmitOutcome, ScoreError> {
    if game.phase != GamePhase::GameOver {
        return Err(ScoreError::GameNotOver);
    }
    if game.submitted {
        return Err(ScoreError::AlreadySubmitted);
    }
    let outcome = submit_score(store, identities, username, game.score)?;
    if matches!(outcome, SubmitOutcome::Accepted { .. }) {
        game.submitted = true;
    }
    Ok(outcome)
}
