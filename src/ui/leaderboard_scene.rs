//! Sky Hopper leaderboard rendering.

use crate::scores::{ScoreEntry, LEADERBOARD_SIZE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MEDALS: [Color; LEADERBOARD_SIZE] = [Color::Yellow, Color::Gray, Color::Rgb(205, 127, 50)];

/// Render the top scores, or `error` if the store could not be read.
pub fn render_leaderboard(
    frame: &mut Frame,
    area: Rect,
    entries: &[ScoreEntry],
    error: Option<&str>,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" High Scores ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let lines: Vec<Line> = if let Some(error) = error {
        vec![Line::from(Span::styled(
            format!("Leaderboard unavailable: {}", error),
            Style::default().fg(Color::Red),
        ))]
    } else if entries.is_empty() {
        vec![Line::from(Span::styled(
            "No scores yet. Play Sky Hopper to set one.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        entries
            .iter()
            .take(LEADERBOARD_SIZE)
            .enumerate()
            .map(|(i, entry)| {
                let medal = MEDALS.get(i).copied().unwrap_or(Color::White);
                Line::from(vec![
                    Span::styled(
                        format!("{}. ", i + 1),
                        Style::default().fg(medal).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:<width$}", entry.username, width = 18),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{:>6}", entry.score),
                        Style::default().fg(medal).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);

    let help = Paragraph::new("[Esc] Back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[1]);
}
