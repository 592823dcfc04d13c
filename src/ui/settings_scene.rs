//! Read-only view of the merged settings of each group.

use super::game_common::rgb_color;
use crate::settings::{SettingKind, SettingsSnapshot, GROUP_KEYS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

/// Which settings group is on screen.
#[derive(Debug, Default)]
pub struct SettingsView {
    pub group_index: usize,
}

impl SettingsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self) -> &'static str {
        GROUP_KEYS[self.group_index % GROUP_KEYS.len()]
    }

    pub fn next_group(&mut self) {
        self.group_index = (self.group_index + 1) % GROUP_KEYS.len();
    }

    pub fn prev_group(&mut self) {
        self.group_index = (self.group_index + GROUP_KEYS.len() - 1) % GROUP_KEYS.len();
    }
}

/// Render `snapshot`, which should be the group `view` points at.
pub fn render_settings(
    frame: &mut Frame,
    area: Rect,
    view: &SettingsView,
    snapshot: &SettingsSnapshot,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let tabs = Tabs::new(GROUP_KEYS.to_vec())
        .select(view.group_index % GROUP_KEYS.len())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let label = Style::default().fg(Color::DarkGray);
    let lines: Vec<Line> = snapshot
        .iter()
        .map(|(key, record)| {
            let value = match record.kind {
                SettingKind::Number => {
                    let number = record.as_number().unwrap_or_default();
                    let range = match (record.min, record.max) {
                        (Some(min), Some(max)) => format!("  [{}..{}]", min, max),
                        _ => String::new(),
                    };
                    vec![
                        Span::styled(format!("{}", number), Style::default().fg(Color::White)),
                        Span::styled(range, label),
                    ]
                }
                SettingKind::Color => match record.as_color() {
                    Some(rgb) => vec![
                        Span::styled("██ ", Style::default().fg(rgb_color(rgb))),
                        Span::styled(rgb.to_hex(), Style::default().fg(Color::White)),
                    ],
                    None => vec![Span::styled("?", label)],
                },
                SettingKind::Text => vec![Span::styled(
                    record.as_str().unwrap_or_default().to_string(),
                    Style::default().fg(Color::White),
                )],
            };
            let mut spans = vec![Span::styled(format!(" {:<18}", key), label)];
            spans.extend(value);
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let help = Paragraph::new("[←/→] Group  [Esc] Back").style(label);
    frame.render_widget(help, chunks[2]);
}
