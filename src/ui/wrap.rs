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

//! Greedy word wrapping.
//!
//! Width is counted in chars — one code unit is one column in this
//! console's width model. Wide-glyph aware wrapping is a non-goal.

/// Wrap `text` to `max_width` columns.
///
/// Existing newlines are hard breaks: each `\n`-separated unit wraps
/// independently. Words longer than the width are hard-split into
/// width-sized fragments. Never returns an empty vec (`[""]` for empty
/// input); `max_width == 0` disables wrapping and returns the text as-is.
#[must_use]
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_owned()];
    }
    if text.is_empty() {
        return vec![String::new()];
    }
    let mut out = Vec::new();
    for unit in text.split('\n') {
        wrap_unit(unit, max_width, &mut out);
    }
    out
}

fn wrap_unit(unit: &str, width: usize, out: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in unit.split_whitespace() {
        let word_len = word.chars().count();

        if line_len > 0 {
            if line_len + 1 + word_len <= width {
                line.push(' ');
                line.push_str(word);
                line_len += 1 + word_len;
                continue;
            }
            out.push(std::mem::take(&mut line));
            line_len = 0;
        }

        if word_len <= width {
            line.push_str(word);
            line_len = word_len;
        } else {
            // Hard-split: full fragments flush immediately, the last one
            // stays open so following words can pack after it.
            let (fragments, tail) = split_long_word(word, width);
            out.extend(fragments);
            line_len = tail.chars().count();
            line = tail;
        }
    }

    out.push(line);
}

fn split_long_word(word: &str, width: usize) -> (Vec<String>, String) {
    let mut fragments = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;
    for c in word.chars() {
        if cur_len == width {
            fragments.push(std::mem::take(&mut cur));
            cur_len = 0;
        }
        cur.push(c);
        cur_len += 1;
    }
    (fragments, cur)
}
