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

//! Scripted stand-in for the remote agent.
//!
//! The console's contract with the agent is an ordered chunk stream plus a
//! finalize signal; this module satisfies it locally so the console runs
//! end-to-end without a provider. Turns come from a JSON script file
//! (`--script`) or a built-in demo, and an exhausted script falls back to
//! a tag-wrapped echo. Chunk boundaries in the scripts intentionally cut
//! through tag markers — that is the case the stream pipeline exists for.

use crate::agent::AgentEvent;
use crate::error::AppError;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

/// Delay between scripted chunks, enough to see streaming happen.
const CHUNK_DELAY: Duration = Duration::from_millis(40);

#[derive(Debug, Deserialize)]
struct Script {
    turns: Vec<Vec<String>>,
}

/// A queue of pre-scripted turns, one per user submission.
#[derive(Debug)]
pub struct ScriptedAgent {
    turns: VecDeque<Vec<String>>,
}

impl ScriptedAgent {
    /// Load turns from a JSON file: `{"turns": [["chunk", ...], ...]}`.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|_| AppError::ScriptNotFound(path.display().to_string()))?;
        let script: Script = serde_json::from_str(&raw)
            .map_err(|e| AppError::ScriptInvalid(format!("{}: {e}", path.display())))?;
        Ok(Self { turns: script.turns.into() })
    }

    /// Built-in demo: one chatty turn, one machine turn the gate must
    /// suppress, then echo.
    #[must_use]
    pub fn demo() -> Self {
        let turns: Vec<Vec<String>> = vec![
            vec![
                "<act".to_owned(),
                "ions>REPLY</actions><te".to_owned(),
                "xt>Desk is live. Ask about balances, ".to_owned(),
                "positions, or just talk.</te".to_owned(),
                "xt>".to_owned(),
            ],
            vec![
                "<actions>GET_BALANCES</actions>".to_owned(),
                "<text>Checking balances...</text>".to_owned(),
            ],
        ];
        Self { turns: turns.into() }
    }

    /// Start streaming the reply for one submission. Chunks and the final
    /// signal arrive on `tx`; failures travel the same channel.
    pub fn send(&mut self, prompt: &str, tx: mpsc::UnboundedSender<AgentEvent>) {
        let chunks = self.turns.pop_front().unwrap_or_else(|| echo_turn(prompt));
        tokio::task::spawn_local(async move {
            let mut full = String::new();
            for chunk in chunks {
                full.push_str(&chunk);
                if tx.send(AgentEvent::Chunk(chunk)).is_err() {
                    // Receiver gone: the turn was abandoned. Nothing to
                    // tear down on this side.
                    return;
                }
                tokio::time::sleep(CHUNK_DELAY).await;
            }
            let _ = tx.send(AgentEvent::Done(full));
        });
    }
}

/// Echo turn with deliberately awkward chunk boundaries.
fn echo_turn(prompt: &str) -> Vec<String> {
    let mut chunks = vec![
        "<actions>RE".to_owned(),
        "PLY</actions><text>You said: ".to_owned(),
    ];
    let mut rest = prompt;
    while rest.len() > 12 {
        let cut = (1..=12).rev().find(|&i| rest.is_char_boundary(i)).unwrap_or(1);
        chunks.push(rest[..cut].to_owned());
        rest = &rest[cut..];
    }
    chunks.push(format!("{rest}</te"));
    chunks.push("xt>".to_owned());
    chunks
}
