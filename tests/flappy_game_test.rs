//! Integration test: Sky Hopper physics, pipes and high scores
//!
//! Runs seeded sessions end to end and checks the bird never reports a
//! position outside the field, pipes keep their gap, and game-over
//! submission goes through the leaderboard rules.

use arcade::games::flappy::{
    jump, reset, step_frame, submit_high_score, tick, Cue, FlappyConfig, FlappyGame,
    MAX_ROTATION, MIN_PIPE_LENGTH,
};
use arcade::games::{FrameOutcome, GamePhase};
use arcade::scores::{AnonymousSession, MemoryScoreStore, ScoreError, ScoreStore, SubmitOutcome};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn started(seed: u64) -> (FlappyGame, ChaCha8Rng) {
    let mut game = FlappyGame::new(FlappyConfig::default());
    jump(&mut game);
    game.take_cues();
    (game, ChaCha8Rng::seed_from_u64(seed))
}

#[test]
fn one_frame_of_gravity_from_rest() {
    let (mut game, mut rng) = started(1);
    game.bird.y = 300.0;
    game.bird.velocity = 0.0;
    game.bird.rotation = 0.0;

    assert_eq!(step_frame(&mut game, 16, &mut rng), Ok(FrameOutcome::Continue));

    assert!((game.bird.velocity - 0.6).abs() < 1e-9);
    assert!((game.bird.y - 300.6).abs() < 1e-9);
    assert!(game.bird.rotation > 0.0 && game.bird.rotation <= MAX_ROTATION);
}

#[test]
fn leaving_through_the_ceiling_keeps_last_valid_position() {
    let (mut game, mut rng) = started(2);
    game.bird.y = 4.0;
    game.bird.velocity = -9.6;

    assert_eq!(step_frame(&mut game, 16, &mut rng), Ok(FrameOutcome::GameOver));

    assert_eq!(game.phase, GamePhase::GameOver);
    assert!((game.bird.y - 4.0).abs() < f64::EPSILON);
    assert!(game.take_cues().contains(&Cue::Collision));
}

#[test]
fn random_play_keeps_bird_in_field() {
    for seed in 0..10 {
        let (mut game, mut rng) = started(seed);
        let max_y = game.config.max_bird_y();
        let mut last_score = 0;

        for _ in 0..3_000 {
            if game.phase != GamePhase::Running {
                break;
            }
            if rng.gen_bool(0.07) {
                jump(&mut game);
            }
            tick(&mut game, 16, &mut rng);

            assert!(game.bird.y >= 0.0 && game.bird.y <= max_y, "y {}", game.bird.y);
            assert!(game.bird.rotation <= MAX_ROTATION);
            assert!(game.score >= last_score);
            last_score = game.score;
            for pipe in &game.pipes {
                let (gap_top, gap_bottom) = pipe.gap_span();
                assert!(pipe.top_height >= MIN_PIPE_LENGTH);
                assert!((gap_bottom - gap_top - game.config.pipe_gap).abs() < 1e-9);
            }
        }
        assert!(game.best_score >= game.score);
    }
}

#[test]
fn flying_level_through_centered_gaps_scores() {
    let (mut game, mut rng) = started(5);
    game.config.gravity = 0.0;
    game.bird.velocity = 0.0;
    // Keep every gap around the bird's fixed height.
    game.config.pipe_gap = 300.0;

    for _ in 0..600 {
        tick(&mut game, 16, &mut rng);
        for pipe in &mut game.pipes {
            pipe.top_height = 150.0;
            pipe.bottom_height = 600.0 - 150.0 - pipe.gap;
        }
    }

    assert_eq!(game.phase, GamePhase::Running);
    assert!(game.score >= 2, "score {}", game.score);
    assert_eq!(game.best_score, game.score);
}

#[test]
fn reset_returns_to_not_started_and_keeps_best() {
    let (mut game, mut rng) = started(6);
    game.score = 4;
    game.best_score = 4;
    game.bird.y = 0.5;
    game.bird.velocity = -5.0;
    tick(&mut game, 16, &mut rng);
    assert_eq!(game.phase, GamePhase::GameOver);

    reset(&mut game);

    assert_eq!(game.phase, GamePhase::NotStarted);
    assert_eq!(game.score, 0);
    assert_eq!(game.best_score, 4);
    assert!(!tick(&mut game, 100, &mut rng));
    assert!(jump(&mut game));
    assert_eq!(game.phase, GamePhase::Running);
}

#[test]
fn game_over_submission_follows_leaderboard_rules() {
    let mut store = MemoryScoreStore::new();
    let mut session = AnonymousSession::new();

    for (name, score) in [("a", 50), ("b", 40), ("c", 30)] {
        let mut game = FlappyGame::new(FlappyConfig::default());
        game.score = score;
        game.phase = GamePhase::GameOver;
        submit_high_score(&mut game, &mut store, &mut session, name).unwrap();
    }

    let mut low = FlappyGame::new(FlappyConfig::default());
    low.score = 25;
    low.phase = GamePhase::GameOver;
    let outcome = submit_high_score(&mut low, &mut store, &mut session, "d").unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected { lowest: 30 });
    assert!(!low.submitted);

    let mut blank = FlappyGame::new(FlappyConfig::default());
    blank.score = 99;
    blank.phase = GamePhase::GameOver;
    let err = submit_high_score(&mut blank, &mut store, &mut session, "   ").unwrap_err();
    assert!(matches!(err, ScoreError::EmptyUsername));

    let scores: Vec<u32> = store.list(10).unwrap().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![50, 40, 30]);
}
