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

//! Editing-key extraction from the raw byte stream.
//!
//! Keys are modeled as one fixed tagged record — key code plus modifier
//! bitset, reusing `crossterm`'s data types — and produced only here.
//! Everything this boundary does not claim passes through untouched for
//! the scrubber to classify.

use crossterm::event::{KeyCode, KeyModifiers};

/// A decoded key press. `crossterm`'s `KeyCode`/`KeyModifiers` are used as
/// plain data; its event parser is not involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    #[must_use]
    pub fn plain(code: KeyCode) -> Self {
        Self { code, modifiers: KeyModifiers::NONE }
    }

    #[must_use]
    pub fn ctrl(c: char) -> Self {
        Self { code: KeyCode::Char(c), modifiers: KeyModifiers::CONTROL }
    }
}

/// One item of the decoded stream, in arrival order. Order matters: in
/// `"hello\r"` the text must land in the field before Enter submits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamItem {
    Key(KeyPress),
    /// Unclaimed bytes — printable text, pasted newlines, and any escape
    /// sequences the scrubber owns (mouse reports, OSC, unknown CSI).
    Text(String),
}

/// Split a raw chunk into an ordered sequence of key presses and text
/// runs. Adjacent unclaimed bytes coalesce into one `Text` item.
///
/// CR is the Enter key; LF stays in the text so pasted multi-line input
/// survives. DEL/BS are Backspace, remaining C0 bytes become Ctrl-letter
/// chords, and complete arrow/nav CSI sequences map to their key codes.
/// An ESC that introduces anything else is passed through as text.
#[must_use]
pub fn extract(chunk: &str) -> Vec<StreamItem> {
    let bytes = chunk.as_bytes();
    let mut out: Vec<StreamItem> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            0x0d => {
                out.push(StreamItem::Key(KeyPress::plain(KeyCode::Enter)));
                i += 1;
            }
            0x7f | 0x08 => {
                out.push(StreamItem::Key(KeyPress::plain(KeyCode::Backspace)));
                i += 1;
            }
            0x1b => {
                if let Some((len, code)) = match_nav_sequence(&bytes[i..]) {
                    out.push(StreamItem::Key(KeyPress::plain(code)));
                    i += len;
                } else {
                    push_text(&mut out, "\u{1b}");
                    i += 1;
                }
            }
            b @ 0x01..=0x1a if b != b'\t' && b != b'\n' => {
                out.push(StreamItem::Key(KeyPress::ctrl((b + b'a' - 1) as char)));
                i += 1;
            }
            _ => {
                let end = next_char_boundary(chunk, i);
                push_text(&mut out, &chunk[i..end]);
                i = end;
            }
        }
    }
    out
}

fn push_text(out: &mut Vec<StreamItem>, s: &str) {
    if let Some(StreamItem::Text(last)) = out.last_mut() {
        last.push_str(s);
    } else {
        out.push(StreamItem::Text(s.to_owned()));
    }
}

fn next_char_boundary(s: &str, i: usize) -> usize {
    let mut j = i + 1;
    while j < s.len() && !s.is_char_boundary(j) {
        j += 1;
    }
    j
}

/// Complete navigation sequences this boundary claims. Mouse reports
/// (`ESC [ <`) deliberately fall through.
fn match_nav_sequence(b: &[u8]) -> Option<(usize, KeyCode)> {
    if b.get(1) != Some(&b'[') {
        return None;
    }
    match *b.get(2)? {
        b'A' => Some((3, KeyCode::Up)),
        b'B' => Some((3, KeyCode::Down)),
        b'C' => Some((3, KeyCode::Right)),
        b'D' => Some((3, KeyCode::Left)),
        b'H' => Some((3, KeyCode::Home)),
        b'F' => Some((3, KeyCode::End)),
        b'3' if b.get(3) == Some(&b'~') => Some((4, KeyCode::Delete)),
        b'5' if b.get(3) == Some(&b'~') => Some((4, KeyCode::PageUp)),
        b'6' if b.get(3) == Some(&b'~') => Some((4, KeyCode::PageDown)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> StreamItem {
        StreamItem::Key(KeyPress::plain(code))
    }

    fn text(s: &str) -> StreamItem {
        StreamItem::Text(s.to_owned())
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(extract("hello"), vec![text("hello")]);
    }

    #[test]
    fn cr_is_enter() {
        assert_eq!(extract("\r"), vec![key(KeyCode::Enter)]);
    }

    #[test]
    fn lf_stays_text() {
        assert_eq!(extract("line one\nline two"), vec![text("line one\nline two")]);
    }

    #[test]
    fn del_and_bs_are_backspace() {
        assert_eq!(
            extract("\x7f\x08"),
            vec![key(KeyCode::Backspace), key(KeyCode::Backspace)]
        );
    }

    #[test]
    fn ctrl_chords() {
        assert_eq!(
            extract("\x03\x04\x0c"),
            vec![
                StreamItem::Key(KeyPress::ctrl('c')),
                StreamItem::Key(KeyPress::ctrl('d')),
                StreamItem::Key(KeyPress::ctrl('l')),
            ]
        );
    }

    #[test]
    fn tab_is_text() {
        assert_eq!(extract("\ta"), vec![text("\ta")]);
    }

    #[test]
    fn arrows_and_paging() {
        assert_eq!(
            extract("\x1b[A\x1b[B\x1b[5~\x1b[6~"),
            vec![
                key(KeyCode::Up),
                key(KeyCode::Down),
                key(KeyCode::PageUp),
                key(KeyCode::PageDown),
            ]
        );
    }

    #[test]
    fn mouse_report_not_claimed() {
        assert_eq!(extract("\x1b[<64;1;1M"), vec![text("\x1b[<64;1;1M")]);
    }

    /// Text before a key stays before it — submit order depends on this.
    #[test]
    fn stream_order_preserved() {
        assert_eq!(
            extract("hi\x7f\rmore"),
            vec![text("hi"), key(KeyCode::Backspace), key(KeyCode::Enter), text("more")]
        );
    }

    #[test]
    fn adjacent_text_coalesces() {
        // ESC passthrough merges with surrounding text into one run
        assert_eq!(extract("a\x1bz"), vec![text("a\u{1b}z")]);
    }

    #[test]
    fn unicode_passes_through() {
        assert_eq!(extract("€láb"), vec![text("€láb")]);
    }
}
