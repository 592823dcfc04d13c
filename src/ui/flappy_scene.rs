//! UI rendering for Sky Hopper, including the high-score entry shown at
//! game over.

use super::game_common::{
    create_game_layout, render_center_prompt, render_game_over_overlay,
    render_info_panel_frame, render_status_bar, rgb_color, Cell, CellGrid, FieldScale,
    GameResultType,
};
use crate::games::flappy::{Cue, FlappyGame};
use crate::games::GamePhase;
use crate::scores::{ScoreError, SubmitOutcome, MAX_USERNAME_LEN};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SKY_BG: Color = Color::Rgb(20, 30, 48);

/// How long a cue flash stays on screen.
pub const FLASH_MS: u64 = 120;

/// Background tint standing in for a sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub color: Color,
    pub remaining_ms: u64,
}

impl Flash {
    pub fn for_cue(cue: Cue) -> Self {
        let color = match cue {
            Cue::Jump => Color::Rgb(30, 44, 70),
            Cue::Score => Color::Rgb(70, 64, 20),
            Cue::Collision => Color::Rgb(90, 20, 20),
        };
        Self {
            color,
            remaining_ms: FLASH_MS,
        }
    }
}

/// Scene state that lives outside the game: the name being typed, the last
/// submission notice and the active flash.
#[derive(Debug, Default)]
pub struct FlappyScene {
    pub name_input: String,
    pub cursor_position: usize,
    /// Message and whether it reports success.
    pub notice: Option<(String, bool)>,
    pub flash: Option<Flash>,
}

impl FlappyScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the game's cues into a flash. Collision outranks score, which
    /// outranks jump.
    pub fn absorb_cues(&mut self, cues: &[Cue]) {
        let strongest = cues.iter().copied().max_by_key(|cue| match cue {
            Cue::Jump => 0,
            Cue::Score => 1,
            Cue::Collision => 2,
        });
        if let Some(cue) = strongest {
            self.flash = Some(Flash::for_cue(cue));
        }
    }

    /// Age the flash by `dt_ms`.
    pub fn update(&mut self, dt_ms: u64) {
        if let Some(flash) = &mut self.flash {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(dt_ms);
            if flash.remaining_ms == 0 {
                self.flash = None;
            }
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        if c.is_control() || self.name_input.chars().count() >= MAX_USERNAME_LEN {
            return;
        }
        let byte_idx = self
            .name_input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.name_input.len());
        self.name_input.insert(byte_idx, c);
        self.cursor_position += 1;
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        if let Some((byte_idx, _)) = self.name_input.char_indices().nth(self.cursor_position - 1) {
            self.name_input.remove(byte_idx);
            self.cursor_position -= 1;
        }
    }

    /// Record how a submission went.
    pub fn set_submission_result(&mut self, result: &Result<SubmitOutcome, ScoreError>) {
        self.notice = Some(submission_notice(result));
    }

    /// Clear per-game state for a new run. The typed name is kept.
    pub fn reset(&mut self) {
        self.notice = None;
        self.flash = None;
    }
}

/// User-facing text for a submission result, and whether it succeeded.
pub fn submission_notice(result: &Result<SubmitOutcome, ScoreError>) -> (String, bool) {
    match result {
        Ok(SubmitOutcome::Accepted { rank, .. }) => {
            (format!("Saved! You placed #{} on the board.", rank), true)
        }
        Ok(SubmitOutcome::Rejected { lowest }) => (
            format!("Not a top score. Beat {} to get on the board.", lowest),
            false,
        ),
        Err(e) => (format!("Could not save: {}", e), false),
    }
}

/// Render the Sky Hopper scene.
pub fn render_flappy_scene(frame: &mut Frame, area: Rect, game: &FlappyGame, scene: &FlappyScene) {
    if game.phase == GamePhase::GameOver {
        render_flappy_game_over(frame, area, game, scene);
        return;
    }

    let title = format!(" {} ", game.config.title);
    let layout = create_game_layout(frame, area, &title, Color::Cyan);

    render_play_area(frame, layout.content, game, scene.flash);
    if game.phase == GamePhase::NotStarted {
        render_center_prompt(frame, layout.content, "Press Space to fly", Color::Yellow);
    }
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Bird glyph by rotation: climbing, level, diving.
fn bird_glyph(rotation: f64) -> char {
    if rotation < -10.0 {
        '▲'
    } else if rotation > 45.0 {
        '▼'
    } else {
        '►'
    }
}

fn render_play_area(frame: &mut Frame, area: Rect, game: &FlappyGame, flash: Option<Flash>) {
    if area.width < 8 || area.height < 4 {
        return;
    }

    let config = &game.config;
    let scale = FieldScale::new(config.field_width, config.field_height, area.width, area.height);
    let mut grid = CellGrid::new(area.width, area.height);
    grid.tint(flash.map(|f| f.color).unwrap_or(SKY_BG));

    let pipe_color = rgb_color(config.pipe_color);
    for pipe in &game.pipes {
        let (fg, ch) = if pipe.decorative {
            (Color::LightGreen, '▓')
        } else {
            (pipe_color, '█')
        };
        let cell = Cell {
            ch,
            fg,
            bg: Color::Reset,
        };
        grid.fill(&scale, &pipe.top_rect(), cell);
        grid.fill(&scale, &pipe.bottom_rect(), cell);
    }

    grid.fill(
        &scale,
        &game.bird_rect(),
        Cell {
            ch: bird_glyph(game.bird.rotation),
            fg: rgb_color(config.bird_color),
            bg: Color::Reset,
        },
    );

    let score_text = game.score.to_string();
    let col = (area.width / 2).saturating_sub(score_text.len() as u16 / 2);
    grid.text(col, 0, &score_text, Color::White);

    grid.render(frame, area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let controls = [("[Space/Up]", "Flap"), ("[Esc]", "Menu")];
    let (text, color) = match game.phase {
        GamePhase::NotStarted => ("Ready".to_string(), Color::Yellow),
        _ => (format!("Score: {}", game.score), Color::Green),
    };
    render_status_bar(frame, area, &text, color, &controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let inner = render_info_panel_frame(frame, area, "Flight");
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
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
            Span::styled(" Gap:   ", label),
            Span::styled(
                format!("{:.0}", game.config.pipe_gap),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Pace:  ", label),
            Span::styled(
                format!("x{:.1}", game.config.difficulty),
                Style::default().fg(Color::LightRed),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_flappy_game_over(frame: &mut Frame, area: Rect, game: &FlappyGame, scene: &FlappyScene) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(5)])
        .split(area);

    let new_best = game.score > 0 && game.score >= game.best_score;
    let (result_type, title) = if new_best {
        (GameResultType::NewBest, "NEW BEST!")
    } else {
        (GameResultType::Crash, "CRASH!")
    };
    let message = format!("You passed {} pipes.", game.score);
    let detail = format!("Best: {}", game.best_score);
    render_game_over_overlay(
        frame,
        chunks[0],
        result_type,
        title,
        &message,
        &detail,
        "[Tab] Play again   [Esc] Menu",
    );

    render_name_entry(frame, chunks[1], game, scene);
}

fn render_name_entry(frame: &mut Frame, area: Rect, game: &FlappyGame, scene: &FlappyScene) {
    let block = Block::default()
        .title(" High Score ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    if game.submitted {
        lines.push(Line::from(Span::styled(
            " Score saved.",
            Style::default().fg(Color::Green),
        )));
    } else {
        let input = {
            let chars: Vec<char> = scene.name_input.chars().collect();
            let split = scene.cursor_position.min(chars.len());
            let before: String = chars[..split].iter().collect();
            let after: String = chars[split..].iter().collect();
            format!("{}_{}", before, after)
        };
        lines.push(Line::from(vec![
            Span::styled(" Name: ", Style::default().fg(Color::DarkGray)),
            Span::styled(input, Style::default().fg(Color::White)),
            Span::styled("   [Enter] Submit", Style::default().fg(Color::DarkGray)),
        ]));
    }

    if let Some((notice, ok)) = &scene.notice {
        let color = if *ok { Color::Green } else { Color::Red };
        lines.push(Line::from(Span::styled(
            format!(" {}", notice),
            Style::default().fg(color),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
