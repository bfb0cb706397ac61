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

//! Incremental extraction of `<name>…</name>` sections from a chunked
//! text stream.
//!
//! The agent's reply arrives in arbitrary-sized chunks, and a tag marker
//! can be split across any number of them. One extractor owns one stream
//! buffer; all configured tags are recognized by a single tokenizing pass
//! per push, which dispatches extracted spans to per-tag trackers. No
//! tracker consumes the buffer behind another's back, so recognition does
//! not depend on the order trackers were configured in.

/// Lifecycle of one tracked tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Open marker not seen yet.
    WaitingOpen,
    /// Between markers; text is accumulating.
    Accumulating,
    /// Close marker seen (or stream finished); text is final until reset.
    Done,
}

#[derive(Debug)]
struct TagTracker {
    name: String,
    open: String,
    close: String,
    state: TrackerState,
    text: String,
}

impl TagTracker {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            open: format!("<{name}>"),
            close: format!("</{name}>"),
            state: TrackerState::WaitingOpen,
            text: String::new(),
        }
    }

    fn reset(&mut self) {
        self.state = TrackerState::WaitingOpen;
        self.text.clear();
    }
}

/// Stateful tag extractor over one chunked stream.
#[derive(Debug)]
pub struct TagExtractor {
    buf: String,
    trackers: Vec<TagTracker>,
}

impl TagExtractor {
    /// Track the given tag names on one stream. The set is fixed for the
    /// extractor's lifetime.
    #[must_use]
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            buf: String::new(),
            trackers: names.into_iter().map(TagTracker::new).collect(),
        }
    }

    /// Append the next chunk and advance every tracker.
    pub fn push(&mut self, chunk: &str) {
        self.buf.push_str(chunk);
        self.tokenize();
    }

    /// Accumulated text for `name`, exactly the bytes seen so far between
    /// its markers (minus a close-marker-length holdback while still
    /// accumulating).
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.tracker(name).map(|t| t.text.as_str())
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<TrackerState> {
        self.tracker(name).map(|t| t.state)
    }

    /// Whether the open marker for `name` has been seen.
    #[must_use]
    pub fn opened(&self, name: &str) -> bool {
        self.tracker(name)
            .is_some_and(|t| t.state != TrackerState::WaitingOpen)
    }

    #[must_use]
    pub fn is_done(&self, name: &str) -> bool {
        self.tracker(name).is_some_and(|t| t.state == TrackerState::Done)
    }

    /// End-of-stream: a tag still accumulating can never see its close
    /// marker, so flush the held-back buffer into it and finalize. The
    /// caller decides when the stream is over; the extractor never guesses.
    pub fn finish(&mut self) {
        if let Some(t) = self
            .trackers
            .iter_mut()
            .find(|t| t.state == TrackerState::Accumulating)
        {
            t.text.push_str(&self.buf);
            self.buf.clear();
            t.state = TrackerState::Done;
        }
    }

    /// Start over for a new stream: every tracker back to waiting, all
    /// accumulated text and buffered input discarded.
    pub fn reset(&mut self) {
        self.buf.clear();
        for t in &mut self.trackers {
            t.reset();
        }
    }

    /// Reset a single tracker so a later occurrence of its tag in the same
    /// stream is extracted afresh. Prior accumulated text is discarded.
    pub fn reset_tag(&mut self, name: &str) {
        if let Some(t) = self.trackers.iter_mut().find(|t| t.name == name) {
            t.reset();
            // Already-buffered input may contain the next occurrence.
            self.tokenize();
        }
    }

    fn tracker(&self, name: &str) -> Option<&TagTracker> {
        self.trackers.iter().find(|t| t.name == name)
    }

    /// One pass over the shared buffer. At most one tracker accumulates at
    /// a time; while none does, the earliest open marker in the buffer
    /// wins, regardless of tracker configuration order.
    fn tokenize(&mut self) {
        loop {
            if let Some(idx) = self
                .trackers
                .iter()
                .position(|t| t.state == TrackerState::Accumulating)
            {
                let close = self.trackers[idx].close.clone();
                if let Some(pos) = self.buf.find(&close) {
                    self.trackers[idx].text.push_str(&self.buf[..pos]);
                    self.buf.drain(..pos + close.len());
                    self.trackers[idx].state = TrackerState::Done;
                    continue;
                }
                // Expose everything except a close-marker-length suffix, so
                // a close marker split across chunks is never partially
                // shown. The holdback is per tracker, sized to its own
                // close marker.
                let keep = floor_char_boundary(&self.buf, self.buf.len().saturating_sub(close.len()));
                if keep > 0 {
                    self.trackers[idx].text.push_str(&self.buf[..keep]);
                    self.buf.drain(..keep);
                }
                return;
            }

            let mut earliest: Option<(usize, usize)> = None;
            for (i, t) in self.trackers.iter().enumerate() {
                if t.state != TrackerState::WaitingOpen {
                    continue;
                }
                if let Some(pos) = self.buf.find(&t.open) {
                    if earliest.is_none_or(|(best, _)| pos < best) {
                        earliest = Some((pos, i));
                    }
                }
            }
            match earliest {
                Some((pos, i)) => {
                    let open_len = self.trackers[i].open.len();
                    self.buf.drain(..pos + open_len);
                    self.trackers[i].state = TrackerState::Accumulating;
                }
                // No marker yet. The buffer is kept un-consumed: an open
                // marker may still be arriving split across chunks.
                None => return,
            }
        }
    }
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn actions_text() -> TagExtractor {
        TagExtractor::new(["actions", "text"])
    }

    #[test]
    fn whole_reply_in_one_chunk() {
        let mut ex = actions_text();
        ex.push("<actions>REPLY</actions><text>hello</text>");
        assert_eq!(ex.text("actions"), Some("REPLY"));
        assert_eq!(ex.text("text"), Some("hello"));
        assert!(ex.is_done("actions"));
        assert!(ex.is_done("text"));
    }

    #[test]
    fn markers_split_across_chunks() {
        let mut ex = actions_text();
        for chunk in ["<actions>REP", "LY</actions><te", "xt>A", "B</te", "xt>"] {
            ex.push(chunk);
        }
        assert_eq!(ex.text("actions"), Some("REPLY"));
        assert_eq!(ex.text("text"), Some("AB"));
    }

    #[test]
    fn split_at_every_boundary() {
        let stream = "<actions>GET_BALANCES</actions><text>Checking...</text>";
        for cut in 1..stream.len() {
            let (a, b) = stream.split_at(cut);
            let mut ex = actions_text();
            ex.push(a);
            ex.push(b);
            assert_eq!(ex.text("actions"), Some("GET_BALANCES"), "cut {cut}");
            assert_eq!(ex.text("text"), Some("Checking..."), "cut {cut}");
        }
    }

    #[test]
    fn preamble_before_open_suppressed() {
        let mut ex = actions_text();
        ex.push("thinking out loud <actions>REPLY</actions>");
        assert_eq!(ex.text("actions"), Some("REPLY"));
        assert_eq!(ex.text("text"), Some(""));
        assert!(!ex.opened("text"));
    }

    #[test]
    fn holdback_never_exposes_partial_close() {
        let mut ex = TagExtractor::new(["text"]);
        ex.push("<text>ABCDEFGH</");
        // "</" could be the start of the close marker — withheld
        assert_eq!(ex.text("text"), Some("ABC"));
        ex.push("text>");
        assert_eq!(ex.text("text"), Some("ABCDEFGH"));
        assert!(ex.is_done("text"));
    }

    #[test]
    fn content_with_angle_brackets_kept() {
        let mut ex = TagExtractor::new(["text"]);
        ex.push("<text>1 < 2 and </b> is not our tag</text>");
        assert_eq!(ex.text("text"), Some("1 < 2 and </b> is not our tag"));
    }

    #[test]
    fn done_tracker_ignores_further_input() {
        let mut ex = TagExtractor::new(["text"]);
        ex.push("<text>one</text> trailing <text>two</text>");
        assert_eq!(ex.text("text"), Some("one"));
        assert!(ex.is_done("text"));
    }

    #[test]
    fn reset_tag_tracks_next_occurrence() {
        let mut ex = TagExtractor::new(["text"]);
        ex.push("<text>one</text>");
        assert_eq!(ex.text("text"), Some("one"));
        ex.reset_tag("text");
        assert_eq!(ex.state("text"), Some(TrackerState::WaitingOpen));
        assert_eq!(ex.text("text"), Some(""));
        ex.push("<text>two</text>");
        assert_eq!(ex.text("text"), Some("two"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut ex = actions_text();
        ex.push("<actions>REPLY</actions><text>partial");
        ex.reset();
        assert_eq!(ex.text("actions"), Some(""));
        assert_eq!(ex.state("text"), Some(TrackerState::WaitingOpen));
        ex.push("<actions>OK</actions>");
        assert_eq!(ex.text("actions"), Some("OK"));
    }

    #[test]
    fn finish_flushes_unclosed_tag() {
        let mut ex = TagExtractor::new(["text"]);
        ex.push("<text>never closed");
        // tail partially withheld while streaming
        assert!(!ex.is_done("text"));
        ex.finish();
        assert_eq!(ex.text("text"), Some("never closed"));
        assert!(ex.is_done("text"));
    }

    #[test]
    fn finish_without_open_is_a_no_op() {
        let mut ex = TagExtractor::new(["text"]);
        ex.push("no tags here");
        ex.finish();
        assert_eq!(ex.text("text"), Some(""));
        assert!(!ex.is_done("text"));
    }

    #[test]
    fn multibyte_content_exposed_on_boundaries() {
        let mut ex = TagExtractor::new(["text"]);
        ex.push("<text>préço→⇧</");
        let partial = ex.text("text").map(str::len).unwrap_or_default();
        // never slices mid-codepoint
        assert!(ex.text("text").is_some());
        ex.push("text>");
        assert_eq!(ex.text("text"), Some("préço→⇧"));
        assert!(partial <= "préço→⇧".len());
    }

    #[test]
    fn single_char_chunks() {
        let stream = "<actions>REPLY</actions><text>ok</text>";
        let mut ex = actions_text();
        for c in stream.chars() {
            ex.push(&c.to_string());
        }
        assert_eq!(ex.text("actions"), Some("REPLY"));
        assert_eq!(ex.text("text"), Some("ok"));
    }

    #[test]
    fn configuration_order_does_not_matter() {
        // "text" configured first, but "actions" opens first in the stream
        let mut ex = TagExtractor::new(["text", "actions"]);
        ex.push("<actions>REPLY</actions><text>hi</text>");
        assert_eq!(ex.text("actions"), Some("REPLY"));
        assert_eq!(ex.text("text"), Some("hi"));
    }
}
