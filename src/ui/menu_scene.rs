//! Portal main menu rendering.

use super::game_common::rgb_color;
use crate::portal::{BestScores, MenuItem, PortalMenu};
use crate::settings::{Rgb, CROSSING_KEY, FLAPPY_KEY};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the menu with the portal `title` and `accent` color.
pub fn render_menu(
    frame: &mut Frame,
    area: Rect,
    menu: &PortalMenu,
    title: &str,
    accent: Rgb,
    best: &BestScores,
) {
    frame.render_widget(Clear, area);
    let accent = rgb_color(accent);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),                             // Title
            Constraint::Length(MenuItem::ALL.len() as u16 + 1), // Entries
            Constraint::Min(2),                                // Description
            Constraint::Length(1),                             // Help
        ])
        .split(inner);

    let heading = Paragraph::new(title)
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == menu.selected_index;
            let prefix = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let best_score = match item {
                MenuItem::RoadRush => Some(best.get(CROSSING_KEY)),
                MenuItem::SkyHopper => Some(best.get(FLAPPY_KEY)),
                _ => None,
            };
            let mut spans = vec![Span::styled(format!("{}{}", prefix, item.label()), style)];
            if let Some(score) = best_score.filter(|s| *s > 0) {
                spans.push(Span::styled(
                    format!("  best {}", score),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    frame.render_widget(List::new(items), chunks[1]);

    let description = Paragraph::new(menu.selected().description())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[2]);

    let help = Paragraph::new("[↑/↓] Navigate  [Enter] Select  [Q] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
