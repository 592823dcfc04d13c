//! Road Rush UI rendering.
//!
//! Lanes, obstacles, cars and the character are drawn into a `CellGrid`
//! scaled from the 600x600 field to whatever the play area offers.

use super::game_common::{
    create_game_layout, render_center_prompt, render_game_over_overlay,
    render_info_panel_frame, render_status_bar, rgb_color, Cell, CellGrid, FieldScale,
    GameResultType,
};
use crate::core::geometry;
use crate::games::crossing::{CrossingGame, Heading, LaneKind, MoveOutcome, ObstacleKind};
use crate::games::GamePhase;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const ROAD_BG: Color = Color::Rgb(40, 40, 44);
const GRASS_BG: Color = Color::Rgb(24, 60, 28);
const GOAL_BG: Color = Color::Rgb(70, 60, 20);
const START_BG: Color = Color::Rgb(50, 50, 50);

/// Render the Road Rush scene. `last_move` colors the status line.
pub fn render_crossing_scene(
    frame: &mut Frame,
    area: Rect,
    game: &CrossingGame,
    last_move: Option<MoveOutcome>,
) {
    if game.phase == GamePhase::GameOver {
        render_crossing_game_over(frame, area, game);
        return;
    }

    let title = format!(" {} ", game.config.title);
    let layout = create_game_layout(frame, area, &title, Color::LightGreen);

    render_play_field(frame, layout.content, game);
    if game.phase == GamePhase::NotStarted {
        render_center_prompt(frame, layout.content, "Move to start", Color::Yellow);
    }
    render_status_bar_content(frame, layout.status_bar, game, last_move);
    render_info_panel(frame, layout.info_panel, game);
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &CrossingGame) {
    if area.height < 4 || area.width < 10 {
        return;
    }

    let config = &game.config;
    let scale = FieldScale::new(config.field_width, config.field_height, area.width, area.height);
    let mut grid = CellGrid::new(area.width, area.height);

    for lane in &game.lanes {
        let (bg, ch, fg) = match lane.kind {
            LaneKind::Goal => (GOAL_BG, '░', Color::Yellow),
            LaneKind::Road(_) => (ROAD_BG, ' ', Color::Reset),
            LaneKind::Grass => (GRASS_BG, ' ', Color::Reset),
            LaneKind::Start => (START_BG, ' ', Color::Reset),
        };
        let band = geometry::Rect::new(0.0, lane.top, config.field_width, config.lane_height);
        grid.fill(&scale, &band, Cell { ch, fg, bg });
    }

    for obstacle in &game.obstacles {
        let ch = match obstacle.kind {
            ObstacleKind::Rock => '●',
            ObstacleKind::Tree => '♣',
        };
        grid.fill(
            &scale,
            &obstacle.rect(),
            Cell {
                ch,
                fg: rgb_color(obstacle.color()),
                bg: GRASS_BG,
            },
        );
    }

    for car in &game.cars {
        let ch = match car.heading {
            Heading::Right => '▶',
            Heading::Left => '◀',
        };
        grid.fill(
            &scale,
            &car.rect(),
            Cell {
                ch,
                fg: Color::White,
                bg: rgb_color(car.color),
            },
        );
    }

    let character = &game.character;
    grid.fill(
        &scale,
        &character.rect(),
        Cell {
            ch: '@',
            fg: rgb_color(character.color),
            bg: Color::Reset,
        },
    );

    grid.render(frame, area);
}

fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    game: &CrossingGame,
    last_move: Option<MoveOutcome>,
) {
    let controls = [("[Arrows/WASD]", "Move"), ("[Esc]", "Menu")];
    if game.phase == GamePhase::NotStarted {
        render_status_bar(frame, area, "Ready", Color::Yellow, &controls);
        return;
    }

    let (text, color) = match last_move {
        Some(MoveOutcome::Blocked) => ("Blocked!".to_string(), Color::Red),
        Some(MoveOutcome::LevelComplete) => (format!("Level {}!", game.level), Color::Green),
        _ => (format!("Score: {}", game.score), Color::LightGreen),
    };
    render_status_bar(frame, area, &text, color, &controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &CrossingGame) {
    let inner = render_info_panel_frame(frame, area, "Run");
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Level: ", label),
            Span::styled(
                game.level.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                game.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", label),
            Span::styled(game.best_score.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Speed: ", label),
            Span::styled(
                format!("x{:.2}", game.difficulty_multiplier()),
                Style::default().fg(Color::LightRed),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Cars:  ", label),
            Span::styled(game.cars.len().to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Reach the top", label)),
        Line::from(Span::styled(" for +100.", label)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_crossing_game_over(frame: &mut Frame, area: Rect, game: &CrossingGame) {
    let new_best = game.score > 0 && game.score >= game.best_score;
    let (result_type, title) = if new_best {
        (GameResultType::NewBest, "NEW BEST!")
    } else {
        (GameResultType::Crash, "SPLAT!")
    };
    let message = format!("Hit by traffic on level {} with {} points.", game.level, game.score);
    let detail = format!("Best: {}", game.best_score);
    render_game_over_overlay(
        frame,
        area,
        result_type,
        title,
        &message,
        &detail,
        "[Space] Play again   [Esc] Menu",
    );
}
