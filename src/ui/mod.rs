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

mod chat;
mod input;
mod layout;
pub mod lines;
pub mod scroll;
pub mod theme;
pub mod wrap;

use crate::app::{App, AppStatus};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    let areas = layout::compute(frame_area, input::visual_line_count(app));

    chat::render(frame, areas.body, app);
    render_separator(frame, areas.input_sep);
    input::render(frame, areas.input, app);
    if areas.footer.height > 0 {
        render_footer(frame, areas.footer, app);
    }
}

const FOOTER_PAD: u16 = 2;

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };

    let left = Line::from(vec![
        Span::styled("Enter", Style::default().fg(ratatui::style::Color::White)),
        Span::styled(" send  ", Style::default().fg(theme::DIM)),
        Span::styled("/clear", Style::default().fg(ratatui::style::Color::White)),
        Span::styled(" reset  ", Style::default().fg(theme::DIM)),
        Span::styled("Ctrl+C", Style::default().fg(ratatui::style::Color::White)),
        Span::styled(" quit", Style::default().fg(theme::DIM)),
    ]);

    let (left_area, right_area) = split_footer_columns(padded);
    frame.render_widget(Paragraph::new(left), left_area);

    if let Some(status) = footer_status_text(app) {
        render_footer_right_info(frame, right_area, &status);
    }
}

fn footer_status_text(app: &App) -> Option<String> {
    match app.status {
        AppStatus::Ready => None,
        AppStatus::Thinking | AppStatus::Streaming => {
            let ch = theme::SPINNER_FRAMES[app.spinner_frame % theme::SPINNER_FRAMES.len()];
            let verb = if app.status == AppStatus::Thinking { "thinking" } else { "streaming" };
            Some(format!("{ch} {verb}..."))
        }
    }
}

fn split_footer_columns(area: Rect) -> (Rect, Rect) {
    if area.width == 0 {
        return (area, Rect { width: 0, ..area });
    }
    let gap = u16::from(area.width > 2);
    let usable_width = area.width.saturating_sub(gap);
    let left_width = usable_width.saturating_add(1) / 2;
    let right_width = usable_width.saturating_sub(left_width);

    let left = Rect { width: left_width, ..area };
    let right = Rect {
        x: area.x.saturating_add(left_width).saturating_add(gap),
        width: right_width,
        ..area
    };
    (left, right)
}

fn fit_footer_right_text(text: &str, max_width: usize) -> Option<String> {
    if max_width == 0 || text.trim().is_empty() {
        return None;
    }

    if UnicodeWidthStr::width(text) <= max_width {
        return Some(text.to_owned());
    }

    if max_width <= 3 {
        return Some(".".repeat(max_width));
    }

    let mut fitted = String::new();
    let mut width: usize = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width.saturating_add(ch_width).saturating_add(3) > max_width {
            break;
        }
        fitted.push(ch);
        width = width.saturating_add(ch_width);
    }

    if fitted.is_empty() {
        return Some("...".to_owned());
    }
    fitted.push_str("...");
    Some(fitted)
}

fn render_footer_right_info(frame: &mut Frame, area: Rect, right_text: &str) {
    if area.width == 0 {
        return;
    }
    let Some(fitted) = fit_footer_right_text(right_text, usize::from(area.width)) else {
        return;
    };

    let line = Line::from(Span::styled(fitted, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(area.width as usize);
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_footer_columns_preserves_total_width() {
        let area = Rect::new(0, 0, 80, 1);
        let (left, right) = split_footer_columns(area);
        assert_eq!(left.width.saturating_add(right.width).saturating_add(1), 80);
        assert_eq!(left.width, 40);
        assert_eq!(right.width, 39);
    }

    #[test]
    fn split_footer_columns_zero_width() {
        let area = Rect::new(0, 0, 0, 1);
        let (left, right) = split_footer_columns(area);
        assert_eq!(left.width, 0);
        assert_eq!(right.width, 0);
    }

    #[test]
    fn fit_footer_right_text_truncates_when_needed() {
        let text = "⠋ streaming...";
        let fitted = fit_footer_right_text(text, 8).expect("fitted text");
        assert!(fitted.ends_with("..."));
        assert!(UnicodeWidthStr::width(fitted.as_str()) <= 8);
    }

    #[test]
    fn fit_footer_right_text_passthrough_when_short() {
        assert_eq!(fit_footer_right_text("ok", 10), Some("ok".to_owned()));
    }

    #[test]
    fn fit_footer_right_text_empty_is_none() {
        assert_eq!(fit_footer_right_text("   ", 10), None);
        assert_eq!(fit_footer_right_text("x", 0), None);
    }

    #[test]
    fn footer_status_only_while_turn_in_flight() {
        let mut app = App::test_default();
        assert!(footer_status_text(&app).is_none());
        app.status = AppStatus::Thinking;
        assert!(footer_status_text(&app).is_some_and(|s| s.contains("thinking")));
        app.status = AppStatus::Streaming;
        assert!(footer_status_text(&app).is_some_and(|s| s.contains("streaming")));
    }
}
