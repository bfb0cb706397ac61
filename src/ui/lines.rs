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

//! Transcript-to-display-line building.
//!
//! Recomputed from scratch every render: messages in, a flat ordered list
//! of [`RenderLine`]s out. Lines carry styling *hints* only — mapping a
//! hint to an actual terminal style is the paint layer's business. Keys
//! are derived from `(message id, segment kind, index)` so a line keeps
//! its identity across re-renders even while the in-flight agent message
//! mutates underneath it.

use crate::app::{ChatMessage, Role};
use crate::ui::wrap::wrap;

/// Fixed indent for user/agent body lines.
pub const BODY_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Speaker label + time; bold.
    Header(Role),
    /// Indented message body.
    Body,
    /// Dim, italic, un-indented.
    System,
    /// Horizontal rule emitted verbatim, no wrap, no indent.
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    /// Stable identity across re-renders of the same logical line.
    pub key: String,
    pub text: String,
    pub kind: LineKind,
}

/// Build display lines for the whole transcript at `max_width` columns.
#[must_use]
pub fn build(messages: &[ChatMessage], max_width: usize, agent_label: &str) -> Vec<RenderLine> {
    let mut out = Vec::new();
    for msg in messages {
        build_message(msg, max_width, agent_label, &mut out);
    }
    out
}

fn build_message(
    msg: &ChatMessage,
    max_width: usize,
    agent_label: &str,
    out: &mut Vec<RenderLine>,
) {
    if msg.role == Role::System {
        for (i, line) in wrap(&msg.content, max_width).into_iter().enumerate() {
            out.push(RenderLine {
                key: format!("{}:sys:{i}", msg.id),
                text: line,
                kind: LineKind::System,
            });
        }
        out.push(RenderLine {
            key: format!("{}:end", msg.id),
            text: String::new(),
            kind: LineKind::System,
        });
        return;
    }

    let label = match msg.role {
        Role::User => "You",
        _ => agent_label,
    };
    out.push(RenderLine {
        key: format!("{}:hdr", msg.id),
        text: format!("{label} {}", msg.timestamp.format("%H:%M")),
        kind: LineKind::Header(msg.role),
    });

    let body_width = max_width.saturating_sub(BODY_INDENT.len());
    let mut idx = 0usize;
    for segment in msg.content.split('\n') {
        if is_divider(segment) {
            out.push(RenderLine {
                key: format!("{}:body:{idx}", msg.id),
                text: segment.to_owned(),
                kind: LineKind::Rule,
            });
            idx += 1;
            continue;
        }
        for line in wrap(segment, body_width) {
            out.push(RenderLine {
                key: format!("{}:body:{idx}", msg.id),
                text: format!("{BODY_INDENT}{line}"),
                kind: LineKind::Body,
            });
            idx += 1;
        }
    }

    // Blank separator between messages
    out.push(RenderLine {
        key: format!("{}:end", msg.id),
        text: String::new(),
        kind: LineKind::Body,
    });
}

/// A segment that is purely a run of `-`/`=` characters is a divider the
/// agent drew on purpose; it bypasses wrapping and indentation.
fn is_divider(segment: &str) -> bool {
    segment.chars().count() >= 2 && segment.chars().all(|c| c == '-' || c == '=')
}
