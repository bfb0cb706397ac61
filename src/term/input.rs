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

use crate::term::keys::{self, StreamItem};
use crate::term::{scrub, wheel};

/// Result of feeding one raw chunk through the input pipeline.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InputUpdate {
    /// Keys and scrubbed text runs, in stream order.
    pub items: Vec<StreamItem>,
    /// Net wheel movement decoded from mouse reports (+ up, − down).
    pub scroll_delta: i32,
}

impl InputUpdate {
    /// The chunk's cleaned field text, ignoring keys. Convenience for
    /// callers that only care about the text side.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            if let StreamItem::Text(t) = item {
                out.push_str(t);
            }
        }
        out
    }
}

/// The `onData` boundary: one instance per terminal stream.
///
/// Owns the wheel decoder's pending buffer. Wheel decoding and
/// key-extraction/scrubbing run over the same chunk independently — they
/// share no state — and both finish before the update is returned, so the
/// caller never observes a half-processed chunk.
#[derive(Debug, Default)]
pub struct TerminalInput {
    pending: String,
}

impl TerminalInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw chunk from the terminal.
    pub fn on_data(&mut self, chunk: &str) -> InputUpdate {
        self.pending.push_str(chunk);
        let decoded = wheel::decode(&self.pending);
        self.pending = decoded.remaining;

        let items = keys::extract(chunk)
            .into_iter()
            .filter_map(|item| match item {
                StreamItem::Key(k) => Some(StreamItem::Key(k)),
                StreamItem::Text(t) => {
                    let cleaned = scrub::scrub(&t);
                    // A text run that was pure escape noise disappears
                    (!cleaned.is_empty()).then_some(StreamItem::Text(cleaned))
                }
            })
            .collect();

        InputUpdate { items, scroll_delta: decoded.delta }
    }

    /// Current pending-buffer length; bounded by the wheel grammar.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
