//! Shared UI components for the portal games.

use crate::core::geometry;
use crate::settings::Rgb;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Screen regions of a running game.
pub struct GameLayout {
    pub content: Rect,
    /// Two rows under both the field and the side panel.
    pub status_bar: Rect,
    /// Zero-width when the terminal is too narrow to spare one.
    pub info_panel: Rect,
}

const STATUS_ROWS: u16 = 2;
const PANEL_MIN_WIDTH: u16 = 16;
const PANEL_MAX_WIDTH: u16 = 24;

/// Clear `area`, draw the titled border and split the inside into the play
/// field, a side panel of roughly a quarter of the width and a status bar
/// along the bottom.
pub fn create_game_layout(frame: &mut Frame, area: Rect, title: &str, accent: Color) -> GameLayout {
    frame.render_widget(Clear, area);
    let border = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = border.inner(area);
    frame.render_widget(border, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_ROWS)])
        .split(inner);

    let panel_width = if inner.width >= PANEL_MIN_WIDTH * 3 {
        (inner.width / 4).clamp(PANEL_MIN_WIDTH, PANEL_MAX_WIDTH)
    } else {
        0
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(panel_width)])
        .split(rows[0]);

    GameLayout {
        content: columns[0],
        status_bar: rows[1],
        info_panel: columns[1],
    }
}

/// Status message on the first row, key hints joined by dots on the second.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    let key = Style::default().fg(Color::White);
    let action = Style::default().fg(Color::DarkGray);
    let mut hints = Vec::with_capacity(controls.len() * 3);
    for (i, (k, a)) in controls.iter().enumerate() {
        if i > 0 {
            hints.push(Span::styled(" · ", action));
        }
        hints.push(Span::styled(*k, key));
        hints.push(Span::styled(format!(" {}", a), action));
    }

    let lines = vec![
        Line::from(Span::styled(
            status_text,
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(hints),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// How a session ended, for overlay coloring.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GameResultType {
    /// Ended with a new personal best.
    NewBest,
    Crash,
}

impl GameResultType {
    pub fn color(self) -> Color {
        match self {
            GameResultType::NewBest => Color::Green,
            GameResultType::Crash => Color::Red,
        }
    }
}

/// Render a game-over overlay over `area`: title, message, detail line and
/// a key hint, all centered.
pub fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    result_type: GameResultType,
    title: &str,
    message: &str,
    detail: &str,
    hint: &str,
) {
    frame.render_widget(Clear, area);

    let title_color = result_type.color();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content_height: u16 = 7;
    let y_offset = inner.y + (inner.height.saturating_sub(content_height)) / 2;

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled(detail, Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect::new(
            inner.x,
            y_offset,
            inner.width,
            content_height.min(inner.height),
        ),
    );
}

/// Titled side panel. Returns the area inside its border, empty when the
/// layout dropped the panel.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    if area.width == 0 {
        return area;
    }
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// One-line centered prompt drawn over the middle of `area`.
pub fn render_center_prompt(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    let prompt = Paragraph::new(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(prompt, Rect::new(area.x, y, area.width, 1));
}

/// A stored setting color as a terminal color.
pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Maps pixel coordinates of a play field onto a grid of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldScale {
    pub cols: u16,
    pub rows: u16,
    x_scale: f64,
    y_scale: f64,
}

impl FieldScale {
    pub fn new(field_width: f64, field_height: f64, cols: u16, rows: u16) -> Self {
        let x_scale = if field_width > 0.0 {
            cols as f64 / field_width
        } else {
            1.0
        };
        let y_scale = if field_height > 0.0 {
            rows as f64 / field_height
        } else {
            1.0
        };
        Self {
            cols,
            rows,
            x_scale,
            y_scale,
        }
    }

    pub fn col(&self, x: f64) -> i32 {
        (x * self.x_scale).floor() as i32
    }

    pub fn row(&self, y: f64) -> i32 {
        (y * self.y_scale).floor() as i32
    }

    /// Cells covered by a field rectangle as `(col0, row0, col1, row1)`,
    /// end-exclusive and clipped to the grid. Anything with positive size
    /// covers at least one cell.
    pub fn cells(&self, rect: &geometry::Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(rect.left());
        let r0 = self.row(rect.top());
        let c1 = ((rect.right() * self.x_scale).ceil() as i32).max(c0 + 1);
        let r1 = ((rect.bottom() * self.y_scale).ceil() as i32).max(r0 + 1);

        let clip = |v: i32, max: u16| v.clamp(0, max as i32) as u16;
        let (c0, c1) = (clip(c0, self.cols), clip(c1, self.cols));
        let (r0, r1) = (clip(r0, self.rows), clip(r1, self.rows));
        if c0 >= c1 || r0 >= r1 {
            None
        } else {
            Some((c0, r0, c1, r1))
        }
    }
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Per-character color buffer, stamped row by row as Paragraph widgets.
pub struct CellGrid {
    cells: Vec<Vec<Cell>>,
    width: u16,
    height: u16,
}

impl CellGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        self.cells.get(row as usize)?.get(col as usize)
    }

    pub fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if col < self.width && row < self.height {
            self.cells[row as usize][col as usize] = cell;
        }
    }

    /// Fill the cells a field rectangle covers.
    pub fn fill(&mut self, scale: &FieldScale, rect: &geometry::Rect, cell: Cell) {
        if let Some((c0, r0, c1, r1)) = scale.cells(rect) {
            for row in r0..r1 {
                for col in c0..c1 {
                    self.set(col, row, cell);
                }
            }
        }
    }

    /// Write `text` starting at `col`, clipped at the right edge.
    pub fn text(&mut self, col: u16, row: u16, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else {
                break;
            };
            self.set(col.saturating_add(offset), row, Cell { ch, fg, bg: Color::Reset });
        }
    }

    /// Paint every cell's background, e.g. for a flash.
    pub fn tint(&mut self, bg: Color) {
        for cell in self.cells.iter_mut().flatten() {
            cell.bg = bg;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row_data) in self.cells.iter().enumerate() {
            let y = area.y + row_idx as u16;
            if y >= area.y + area.height {
                break;
            }

            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for &cell in row_data.iter() {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let line = Paragraph::new(Line::from(spans));
            frame.render_widget(line, Rect::new(area.x, y, self.width.min(area.width), 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn layout_for(width: u16, height: u16) -> GameLayout {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut layout = None;
        terminal
            .draw(|frame| {
                let area = frame.size();
                layout = Some(create_game_layout(frame, area, " Test ", Color::Cyan));
            })
            .unwrap();
        layout.unwrap()
    }

    #[test]
    fn test_layout_panel_scales_with_width() {
        let wide = layout_for(120, 40);
        assert_eq!(wide.info_panel.width, PANEL_MAX_WIDTH);
        assert_eq!(wide.status_bar.height, STATUS_ROWS);
        assert_eq!(wide.status_bar.width, 118);
        assert_eq!(wide.content.width + wide.info_panel.width, 118);
        assert_eq!(wide.content.height, 40 - 2 - STATUS_ROWS);

        let medium = layout_for(72, 30);
        assert_eq!(medium.info_panel.width, PANEL_MIN_WIDTH + 1);
    }

    #[test]
    fn test_narrow_layout_drops_panel() {
        let narrow = layout_for(40, 20);
        assert_eq!(narrow.info_panel.width, 0);
        assert_eq!(narrow.content.width, 38);
    }

    #[test]
    fn test_field_scale_maps_corners() {
        let scale = FieldScale::new(600.0, 600.0, 60, 30);
        assert_eq!(scale.col(0.0), 0);
        assert_eq!(scale.col(599.0), 59);
        assert_eq!(scale.row(300.0), 15);
    }

    #[test]
    fn test_small_rect_covers_one_cell() {
        let scale = FieldScale::new(600.0, 600.0, 60, 30);
        let rect = geometry::Rect::new(101.0, 101.0, 2.0, 2.0);
        assert_eq!(scale.cells(&rect), Some((10, 5, 11, 6)));
    }

    #[test]
    fn test_offscreen_rect_is_clipped() {
        let scale = FieldScale::new(400.0, 600.0, 40, 30);
        assert_eq!(scale.cells(&geometry::Rect::new(-80.0, 0.0, 60.0, 50.0)), None);
        let partial = geometry::Rect::new(380.0, 0.0, 60.0, 50.0);
        assert_eq!(scale.cells(&partial), Some((38, 0, 40, 3)));
    }

    #[test]
    fn test_grid_fill_and_text_stay_in_bounds() {
        let scale = FieldScale::new(100.0, 100.0, 10, 10);
        let mut grid = CellGrid::new(10, 10);
        let cell = Cell {
            ch: '#',
            fg: Color::Red,
            bg: Color::Reset,
        };
        grid.fill(&scale, &geometry::Rect::new(90.0, 90.0, 50.0, 50.0), cell);
        grid.text(8, 0, "long text", Color::White);

        assert_eq!(grid.get(9, 9).map(|c| c.ch), Some('#'));
        assert_eq!(grid.get(8, 8).map(|c| c.ch), Some(' '));
        assert_eq!(grid.get(9, 0).map(|c| c.ch), Some('o'));
        assert!(grid.get(10, 0).is_none());
    }

    #[test]
    fn test_rgb_color() {
        assert_eq!(rgb_color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
