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

//! Reply-only display gating.
//!
//! The agent wraps every turn in `<actions>…</actions><text>…</text>`.
//! Only turns whose action is `REPLY` are conversation for the user; any
//! other action (a balance check, an order, …) is a machine step whose
//! `text` must not be shown. The gate forwards newly extracted reply text
//! incrementally once the action has resolved to `REPLY`, and withholds
//! everything otherwise until [`ReplyGate::reset`].

use crate::agent::tags::TagExtractor;

/// Tag carrying the action verb for the turn.
pub const ACTIONS_TAG: &str = "actions";
/// Tag carrying user-facing reply text.
pub const TEXT_TAG: &str = "text";
/// The one action value that makes the turn displayable.
pub const PASS_ACTION: &str = "REPLY";

/// Outcome of finalizing a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized {
    /// Reply text not yet forwarded (holdback flush included), if the turn
    /// was displayable.
    pub reply: Option<String>,
    /// The action verb the agent chose, if the actions tag resolved.
    pub action: Option<String>,
}

#[derive(Debug)]
pub struct ReplyGate {
    extractor: TagExtractor,
    /// Bytes of reply text already forwarded to the caller.
    forwarded: usize,
}

impl Default for ReplyGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractor: TagExtractor::new([ACTIONS_TAG, TEXT_TAG]),
            forwarded: 0,
        }
    }

    /// The resolved action verb, once the actions tag has closed.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.extractor
            .is_done(ACTIONS_TAG)
            .then(|| self.extractor.text(ACTIONS_TAG))
            .flatten()
            .map(str::trim)
    }

    fn pass_through(&self) -> bool {
        self.action() == Some(PASS_ACTION)
    }

    /// Feed the next stream chunk. Returns newly displayable reply text,
    /// or `None` while the turn is (still) not displayable.
    pub fn on_chunk(&mut self, chunk: &str) -> Option<String> {
        self.extractor.push(chunk);
        self.take_new()
    }

    /// Apply the end-of-stream signal. `full` is the complete accumulated
    /// reply, used as a fallback when streaming never reached the reply
    /// tag (e.g. the producer only delivered a final blob).
    pub fn finalize(&mut self, full: &str) -> Finalized {
        if !self.extractor.opened(TEXT_TAG) && !full.is_empty() {
            self.extractor.reset();
            self.forwarded = 0;
            self.extractor.push(full);
        }
        self.extractor.finish();
        let reply = self.take_new();
        Finalized { reply, action: self.action().map(str::to_owned) }
    }

    /// Begin a new turn: all tag state and the forwarded cursor start over.
    pub fn reset(&mut self) {
        self.extractor.reset();
        self.forwarded = 0;
    }

    fn take_new(&mut self) -> Option<String> {
        if !self.pass_through() {
            return None;
        }
        let text = self.extractor.text(TEXT_TAG)?;
        if text.len() > self.forwarded {
            let new = text[self.forwarded..].to_owned();
            self.forwarded = text.len();
            Some(new)
        } else {
            None
        }
    }
}
