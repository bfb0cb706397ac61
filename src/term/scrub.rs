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

//! Escape-sequence scrubbing for text headed into the input field.
//!
//! With mouse reporting enabled, the terminal interleaves mouse report
//! sequences with keystrokes on the same stream. Reads can split a sequence
//! anywhere, so by the time the pieces land in the input field the leading
//! ESC may already be gone. `scrub` therefore removes both complete
//! sequences and their escape-stripped remnants.

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Sequence length caps, so a hostile stream can't make us scan forever
/// looking for a final byte.
const MAX_CSI_LEN: usize = 64;
const MAX_OSC_LEN: usize = 256;

/// Remove terminal control sequences and control bytes from `text`,
/// leaving printable content (plus tab and newline) intact.
///
/// Removes, in order: SGR and legacy CSI mouse reports, X10 mouse reports,
/// the escape-stripped partial forms of both, generic CSI sequences, OSC
/// sequences, bare ESC bytes, and finally C0 control bytes other than tab
/// and newline. `\r\n` and bare `\r` are normalized to `\n` first.
///
/// Idempotent: `scrub(scrub(x)) == scrub(x)`. A single pass is not enough
/// for that — removing a bare ESC can splice the surrounding text into a
/// newly recognizable partial sequence — so the pass is iterated until the
/// result stops changing.
#[must_use]
pub fn scrub(text: &str) -> String {
    let mut cur = normalize_newlines(text);
    loop {
        let next = scrub_once(&cur);
        if next == cur {
            return next;
        }
        cur = next;
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn scrub_once(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        // A skipped sequence can end mid-codepoint (X10 payload bytes are
        // raw); snap forward to the next boundary before touching the str.
        if !text.is_char_boundary(i) {
            i += 1;
            continue;
        }
        let b = bytes[i];
        if b == ESC {
            if let Some(len) = match_escape_sequence(&bytes[i..]) {
                i += len;
            } else {
                // Incomplete or unrecognized: drop the ESC itself and let
                // the partial-form rules below deal with the remnant.
                i += 1;
            }
            continue;
        }
        if b == b'[' {
            if let Some(len) = match_stripped_mouse(&bytes[i..]) {
                i += len;
                continue;
            }
        }
        if b < 0x20 && b != b'\t' && b != b'\n' {
            i += 1;
            continue;
        }
        let end = next_char_boundary(text, i);
        out.push_str(&text[i..end]);
        i = end;
    }
    out
}

fn next_char_boundary(s: &str, i: usize) -> usize {
    let mut j = i + 1;
    while j < s.len() && !s.is_char_boundary(j) {
        j += 1;
    }
    j
}

/// Match a complete escape sequence starting at an ESC byte.
/// Returns the total length to skip.
fn match_escape_sequence(b: &[u8]) -> Option<usize> {
    match *b.get(1)? {
        b'[' => {
            // X10 mouse: ESC [ M followed by exactly 3 raw payload bytes.
            // Must be checked before the generic CSI rule, which would stop
            // at the `M` final byte and leave the payload behind.
            if b.get(2) == Some(&b'M') {
                return (b.len() >= 6).then_some(6);
            }
            // Generic CSI covers SGR/legacy mouse reports along with
            // cursor movement and everything else ESC [ introduces.
            match_csi_body(&b[2..]).map(|n| n + 2)
        }
        b']' => match_osc_body(&b[2..]).map(|n| n + 2),
        _ => None,
    }
}

/// CSI body: parameter/intermediate bytes, then one final byte in the
/// standard 0x40–0x7E range.
fn match_csi_body(b: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < b.len() && i < MAX_CSI_LEN {
        match b[i] {
            0x20..=0x3f => i += 1,
            0x40..=0x7e => return Some(i + 1),
            _ => return None,
        }
    }
    None
}

/// OSC body: anything up to a BEL or `ESC \` terminator.
fn match_osc_body(b: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < b.len() && i < MAX_OSC_LEN {
        if b[i] == BEL {
            return Some(i + 1);
        }
        if b[i] == ESC && b.get(i + 1) == Some(&b'\\') {
            return Some(i + 2);
        }
        i += 1;
    }
    None
}

/// Match a mouse-report remnant whose leading ESC was already stripped:
/// `[ <? digits ; digits ; digits (m|M)` or `[M` plus 3 payload bytes.
///
/// This fires without any evidence of a preceding ESC, so literal pasted
/// text shaped like `[12;3;4m` is eaten too. Accepted false positive:
/// requiring a recent ESC would leave real split mouse reports visible in
/// the field, which is the worse failure.
fn match_stripped_mouse(b: &[u8]) -> Option<usize> {
    if b.get(1) == Some(&b'M') {
        return (b.len() >= 5).then_some(5);
    }
    let mut i = 1;
    if b.get(i) == Some(&b'<') {
        i += 1;
    }
    for field in 0..3 {
        let start = i;
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        if i == start || i - start > 4 {
            return None;
        }
        if field < 2 {
            if b.get(i) != Some(&b';') {
                return None;
            }
            i += 1;
        }
    }
    matches!(b.get(i), Some(b'M' | b'm')).then_some(i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // plain text passes through

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(scrub("hello world"), "hello world");
    }

    #[test]
    fn preserves_tabs_and_newlines() {
        assert_eq!(scrub("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn unicode_unchanged() {
        assert_eq!(scrub("préço \u{1F680} 你好"), "préço \u{1F680} 你好");
    }

    // newline normalization

    #[test]
    fn crlf_normalized() {
        assert_eq!(scrub("a\r\nb"), "a\nb");
    }

    #[test]
    fn bare_cr_normalized() {
        assert_eq!(scrub("a\rb"), "a\nb");
    }

    // mouse reports

    #[test]
    fn sgr_mouse_press_removed() {
        assert_eq!(scrub("ab\x1b[<0;12;34Mcd"), "abcd");
    }

    #[test]
    fn sgr_mouse_release_removed() {
        assert_eq!(scrub("ab\x1b[<0;12;34mcd"), "abcd");
    }

    #[test]
    fn sgr_wheel_removed() {
        assert_eq!(scrub("\x1b[<64;1;1M\x1b[<65;1;1M"), "");
    }

    #[test]
    fn legacy_mouse_removed() {
        assert_eq!(scrub("x\x1b[2;10;20My"), "xy");
    }

    #[test]
    fn x10_mouse_removed() {
        // ESC [ M then exactly three payload bytes
        assert_eq!(scrub("a\x1b[M !!b"), "ab");
    }

    // escape-stripped partial forms

    #[test]
    fn stripped_sgr_partial_removed() {
        assert_eq!(scrub("ab[<64;10;5Mcd"), "abcd");
    }

    #[test]
    fn stripped_legacy_partial_removed() {
        assert_eq!(scrub("ab[12;3;4mcd"), "abcd");
    }

    #[test]
    fn stripped_x10_partial_removed() {
        assert_eq!(scrub("a[M xyb"), "ab");
    }

    #[test]
    fn plain_bracket_text_survives() {
        // no digit;digit;digit shape — not a mouse remnant
        assert_eq!(scrub("see [docs] for details"), "see [docs] for details");
    }

    #[test]
    fn incomplete_partial_survives() {
        // missing final byte: left alone rather than guessed at
        assert_eq!(scrub("[<64;10;5"), "[<64;10;5");
    }

    // other sequences

    #[test]
    fn generic_csi_removed() {
        assert_eq!(scrub("a\x1b[2Jb\x1b[10;20Hc"), "abc");
    }

    #[test]
    fn csi_with_private_prefix_removed() {
        assert_eq!(scrub("a\x1b[?25lb"), "ab");
    }

    #[test]
    fn osc_bel_terminated_removed() {
        assert_eq!(scrub("a\x1b]0;window title\x07b"), "ab");
    }

    #[test]
    fn osc_st_terminated_removed() {
        assert_eq!(scrub("a\x1b]8;;http://x\x1b\\b"), "ab");
    }

    #[test]
    fn bare_escape_removed() {
        assert_eq!(scrub("a\x1bb"), "ab");
    }

    #[test]
    fn c0_removed_except_tab_newline() {
        assert_eq!(scrub("\x00a\x01\tb\x02\nc\x03"), "a\tb\nc");
    }

    // idempotence

    #[test]
    fn idempotent_on_plain_text() {
        let s = "hello [ world ] 12;34";
        assert_eq!(scrub(&scrub(s)), scrub(s));
    }

    #[test]
    fn idempotent_on_mouse_noise() {
        let s = "a\x1b[<64;1;1Mb[<65;2;2mc\x1b[2J";
        assert_eq!(scrub(&scrub(s)), scrub(s));
    }

    #[test]
    fn idempotent_on_spliced_sequence() {
        // The ESC inside the partial form keeps a single pass from matching
        // it; removing the ESC makes it contiguous. The fixpoint loop has
        // to converge to the fully scrubbed value.
        let s = "[<6\x1b4;1;1M";
        let once = scrub(s);
        assert_eq!(once, "");
        assert_eq!(scrub(&once), once);
    }

    #[test]
    fn idempotent_on_osc_and_c0_mix() {
        let s = "x\x1b]2;t\x07\x05y\x1b";
        assert_eq!(scrub(&scrub(s)), scrub(s));
    }

    #[test]
    fn multiline_paste_survives() {
        let s = "first paragraph\n\nsecond\tindented";
        assert_eq!(scrub(s), s);
    }
}
