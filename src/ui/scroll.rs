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

//! Bottom-anchored viewport selection.
//!
//! Offset 0 is the bottom of content, so a growing transcript sticks to
//! its newest lines without any bookkeeping. All arithmetic clamps —
//! zero-height viewports and empty content are normal transient states
//! during resize, not errors.

/// The visible slice for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// The offset actually applied, clamped to `[0, max_scroll]`.
    pub offset: usize,
    pub start: usize,
    /// Exclusive.
    pub end: usize,
}

/// Select the visible `[start, end)` line range for a viewport of
/// `viewport_height` lines over `total_lines` of content, scrolled
/// `requested_offset` lines back from the bottom.
#[must_use]
pub fn window(total_lines: usize, viewport_height: usize, requested_offset: usize) -> Window {
    let max_scroll = total_lines.saturating_sub(viewport_height);
    let offset = requested_offset.min(max_scroll);
    let start = total_lines
        .saturating_sub(viewport_height)
        .saturating_sub(offset);
    let end = total_lines.min(start + viewport_height);
    Window { offset, start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bottom_shows_last_page() {
        let w = window(50, 10, 0);
        assert_eq!((w.start, w.end), (40, 50));
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn overscroll_clamps_to_top() {
        let w = window(50, 10, 100);
        assert_eq!((w.start, w.end), (0, 10));
        assert_eq!(w.offset, 40);
    }

    #[test]
    fn offset_reveals_strictly_earlier_lines() {
        let at_bottom = window(50, 10, 0);
        let scrolled = window(50, 10, 7);
        assert_eq!(scrolled.start, at_bottom.start - 7);
        assert_eq!(scrolled.end - scrolled.start, 10);
    }

    #[test]
    fn short_content_shows_everything() {
        let w = window(4, 10, 0);
        assert_eq!((w.start, w.end), (0, 4));
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn short_content_ignores_offset() {
        let w = window(4, 10, 99);
        assert_eq!((w.start, w.end), (0, 4));
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn empty_content() {
        let w = window(0, 10, 0);
        assert_eq!((w.start, w.end), (0, 0));
    }

    #[test]
    fn zero_height_viewport() {
        let w = window(50, 0, 5);
        assert_eq!(w.end - w.start, 0);
        assert_eq!(w.offset, 5);
    }

    #[test]
    fn growth_sticks_to_bottom_at_offset_zero() {
        let before = window(30, 10, 0);
        let after = window(35, 10, 0);
        assert_eq!(before.end, 30);
        assert_eq!(after.end, 35);
        assert_eq!(after.end - after.start, 10);
    }

    #[test]
    fn exact_fit_boundary() {
        let w = window(10, 10, 3);
        assert_eq!((w.start, w.end), (0, 10));
        assert_eq!(w.offset, 0);
    }
}
