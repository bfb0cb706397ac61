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

use crate::agent::{AgentEvent, ReplyGate, ScriptedAgent};
use crate::term::TerminalInput;
use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::input::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
    System,
}

/// One transcript entry. Append-only: the sequence only shrinks on an
/// explicit `/clear`, and only the in-flight agent message's `content` is
/// mutated (by streaming appends).
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Ready,
    /// Submitted; no displayable reply text yet.
    Thinking,
    /// Reply text is arriving.
    Streaming,
}

/// Scroll position of one panel, in lines back from the bottom of content.
/// Zero means "stick to the bottom"; the window math clamps the upper end
/// against current content each render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
}

impl ScrollState {
    /// Scroll back toward older content.
    pub fn up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines);
    }

    /// Scroll forward toward the newest content.
    pub fn down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn to_bottom(&mut self) {
        self.offset = 0;
    }
}

pub struct App {
    pub messages: Vec<ChatMessage>,
    pub input: InputState,
    pub scroll: ScrollState,
    pub status: AppStatus,
    pub should_quit: bool,
    pub agent_name: String,
    pub spinner_frame: usize,
    pub force_redraw: bool,
    /// Last known terminal size (columns, rows).
    pub viewport: (u16, u16),
    pub term_input: TerminalInput,
    pub gate: ReplyGate,
    pub script: ScriptedAgent,
    pub event_tx: mpsc::UnboundedSender<AgentEvent>,
    pub event_rx: mpsc::UnboundedReceiver<AgentEvent>,
    /// Index of the agent message receiving streamed text, if any.
    pub(super) active_agent_msg: Option<usize>,
    /// Incomplete trailing UTF-8 bytes carried between stdin reads.
    pub(super) utf8_carry: Vec<u8>,
}

impl App {
    #[must_use]
    pub fn new(agent_name: String, script: ScriptedAgent) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            messages: Vec::new(),
            input: InputState::new(),
            scroll: ScrollState::default(),
            status: AppStatus::Ready,
            should_quit: false,
            agent_name,
            spinner_frame: 0,
            force_redraw: false,
            viewport: (0, 0),
            term_input: TerminalInput::new(),
            gate: ReplyGate::new(),
            script,
            event_tx,
            event_rx,
            active_agent_msg: None,
            utf8_carry: Vec::new(),
        }
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(Role::System, content));
    }

    /// Append streamed text to the in-flight agent message, creating it on
    /// the first displayable chunk.
    pub fn append_agent_text(&mut self, text: &str) {
        if let Some(msg) = self.active_agent_msg.and_then(|i| self.messages.get_mut(i)) {
            msg.content.push_str(text);
            return;
        }
        self.messages.push(ChatMessage::new(Role::Agent, text));
        self.active_agent_msg = Some(self.messages.len() - 1);
    }

    /// Empty the transcript. The only operation that removes messages.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.active_agent_msg = None;
        self.scroll.to_bottom();
    }

    #[cfg(test)]
    #[must_use]
    pub fn test_default() -> Self {
        Self::new("Dex".to_owned(), ScriptedAgent::demo())
    }
}
