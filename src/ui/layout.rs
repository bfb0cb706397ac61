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

use ratatui::layout::Rect;

/// Vertical stack, top to bottom: transcript, separator, input, footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub body: Rect,
    pub input_sep: Rect,
    pub input: Rect,
    pub footer: Rect,
}

/// Compute the frame split. The input grows with its line count up to a
/// third of the frame; the transcript gets the rest. Degenerate frame
/// sizes collapse areas to zero height rather than erroring.
#[must_use]
pub fn compute(frame: Rect, input_lines: u16) -> Areas {
    let footer_h = u16::from(frame.height > 3);
    let sep_h = u16::from(frame.height > 2);
    let input_max = (frame.height / 3).max(1);
    let input_h = input_lines.clamp(1, input_max).min(frame.height);
    let body_h = frame
        .height
        .saturating_sub(footer_h)
        .saturating_sub(sep_h)
        .saturating_sub(input_h);

    let body = Rect { height: body_h, ..frame };
    let input_sep = Rect { y: frame.y + body_h, height: sep_h, ..frame };
    let input = Rect { y: frame.y + body_h + sep_h, height: input_h, ..frame };
    let footer = Rect { y: frame.y + body_h + sep_h + input_h, height: footer_h, ..frame };

    Areas { body, input_sep, input, footer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn areas_tile_the_frame() {
        let frame = Rect::new(0, 0, 80, 24);
        let a = compute(frame, 1);
        assert_eq!(a.body.y, 0);
        assert_eq!(a.input_sep.y, a.body.height);
        assert_eq!(a.input.y, a.input_sep.y + a.input_sep.height);
        assert_eq!(a.footer.y, a.input.y + a.input.height);
        assert_eq!(
            a.body.height + a.input_sep.height + a.input.height + a.footer.height,
            24
        );
    }

    #[test]
    fn input_grows_with_lines() {
        let frame = Rect::new(0, 0, 80, 24);
        assert_eq!(compute(frame, 1).input.height, 1);
        assert_eq!(compute(frame, 3).input.height, 3);
    }

    #[test]
    fn input_capped_at_third_of_frame() {
        let frame = Rect::new(0, 0, 80, 24);
        assert_eq!(compute(frame, 100).input.height, 8);
    }

    #[test]
    fn tiny_frame_does_not_underflow() {
        for h in 0..5 {
            let frame = Rect::new(0, 0, 80, h);
            let a = compute(frame, 2);
            let total = a.body.height + a.input_sep.height + a.input.height + a.footer.height;
            assert!(total <= h.max(1), "overflow at height {h}: {total}");
        }
    }
}
