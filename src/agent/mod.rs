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

//! The remote-agent boundary.
//!
//! The console consumes an ordered sequence of text chunks plus a finalize
//! signal; who produces them is not its concern. Events arrive over one
//! mpsc channel owned by the app — including failures, which surface as
//! [`AgentEvent::Error`] and render as a system line. There is no global
//! error-callback registry.

pub mod reply;
pub mod scripted;
pub mod tags;

pub use reply::ReplyGate;
pub use scripted::ScriptedAgent;
pub use tags::{TagExtractor, TrackerState};

/// One event from the agent stream task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// Next raw chunk of the in-flight reply.
    Chunk(String),
    /// Stream finished; carries the full accumulated reply text as a
    /// fallback for consumers that saw no usable chunks.
    Done(String),
    /// The stream task failed. Shown to the user; never fatal here.
    Error(String),
}
