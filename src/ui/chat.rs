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

use crate::app::{App, AppStatus, Role};
use crate::ui::lines::{self, LineKind, RenderLine};
use crate::ui::{scroll, theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;

/// Render the transcript into `area`: rebuild display lines, pick the
/// visible slice, write the clamped offset back so the scroll position
/// stays honest as content and viewport change.
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let width = usize::from(area.width);
    let height = usize::from(area.height);

    let mut all = lines::build(&app.messages, width, &app.agent_name);

    // Trailing spinner while a turn is in flight and nothing is showing yet
    if matches!(app.status, AppStatus::Thinking) {
        let ch = theme::SPINNER_FRAMES[app.spinner_frame % theme::SPINNER_FRAMES.len()];
        all.push(RenderLine {
            key: "spinner".to_owned(),
            text: format!("{ch} thinking..."),
            kind: LineKind::System,
        });
    }

    let win = scroll::window(all.len(), height, app.scroll.offset);
    app.scroll.offset = win.offset;

    let visible: Vec<Line<'static>> = all[win.start..win.end].iter().map(style_line).collect();
    frame.render_widget(Paragraph::new(Text::from(visible)), area);
}

fn style_line(line: &RenderLine) -> Line<'static> {
    let style = match line.kind {
        LineKind::Header(Role::User) => {
            Style::default().fg(theme::ROLE_USER).add_modifier(Modifier::BOLD)
        }
        LineKind::Header(_) => {
            Style::default().fg(theme::ROLE_AGENT).add_modifier(Modifier::BOLD)
        }
        LineKind::System => {
            Style::default().fg(theme::DIM).add_modifier(Modifier::ITALIC)
        }
        LineKind::Rule => Style::default().fg(theme::DIM),
        LineKind::Body => Style::default(),
    };
    Line::from(Span::styled(line.text.clone(), style))
}
