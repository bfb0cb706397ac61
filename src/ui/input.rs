// tickertalk — a terminal chat console for an AI trading agent
// Copyright (C) 2026  tickertalk contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

/// Visual rows the input field wants; layout caps it.
#[must_use]
pub fn visual_line_count(app: &App) -> u16 {
    u16::try_from(app.input.line_count()).unwrap_or(u16::MAX)
}

/// Render the input field: prompt char on the first row, continuation
/// rows indented to match. When the field is taller than its area, the
/// window containing the cursor row is shown.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let rows = usize::from(area.height);
    let first_visible = app.input.cursor_row.saturating_sub(rows.saturating_sub(1));

    let mut out: Vec<Line<'static>> = Vec::with_capacity(rows);
    for (row, text) in app.input.lines.iter().enumerate().skip(first_visible).take(rows) {
        let prefix = if row == 0 {
            Span::styled(
                format!("{} ", theme::PROMPT_CHAR),
                Style::default().fg(theme::TICKER_GREEN),
            )
        } else {
            Span::raw("  ")
        };
        out.push(Line::from(vec![prefix, Span::raw(text.clone())]));
    }
    frame.render_widget(Paragraph::new(out), area);

    // Cursor: prompt is 2 columns; text columns use display width
    let line = &app.input.lines[app.input.cursor_row.min(app.input.lines.len() - 1)];
    let col: usize = line
        .chars()
        .take(app.input.cursor_col)
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum();
    let x = area
        .x
        .saturating_add(2)
        .saturating_add(u16::try_from(col).unwrap_or(u16::MAX));
    let y = area
        .y
        .saturating_add(u16::try_from(app.input.cursor_row - first_visible).unwrap_or(0));
    if x < area.right() && y < area.bottom() {
        frame.set_cursor_position(Position::new(x, y));
    }
}
