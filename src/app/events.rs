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

use super::state::{App, AppStatus, ChatMessage, Role};
use crate::agent::AgentEvent;
use crate::agent::reply::PASS_ACTION;
use crate::term::{KeyPress, StreamItem};
use crate::term::scrub;
use crossterm::event::{KeyCode, KeyModifiers};

/// Lines per wheel notch.
const WHEEL_SCROLL_LINES: usize = 3;

/// Raw bytes arrived from the terminal. Decodes them through the input
/// pipeline and applies keys, text and wheel movement to the app.
pub fn handle_stdin_chunk(app: &mut App, bytes: &[u8]) {
    let chunk = take_valid_utf8(app, bytes);
    if chunk.is_empty() {
        return;
    }

    let update = app.term_input.on_data(&chunk);

    if update.scroll_delta > 0 {
        app.scroll.up(update.scroll_delta.unsigned_abs() as usize * WHEEL_SCROLL_LINES);
    } else if update.scroll_delta < 0 {
        app.scroll.down(update.scroll_delta.unsigned_abs() as usize * WHEEL_SCROLL_LINES);
    }

    for item in update.items {
        match item {
            StreamItem::Key(key) => handle_key(app, key),
            StreamItem::Text(text) => app.input.insert_str(&text),
        }
    }

    // A control sequence split across reads lands in the field piecewise;
    // scrubbing the assembled value removes it once the final byte arrives.
    // scrub() is idempotent, so clean values pass through untouched.
    let assembled = app.input.text();
    let cleaned = scrub::scrub(&assembled);
    if cleaned != assembled {
        app.input.set_text(&cleaned);
    }
}

/// Buffer incomplete trailing UTF-8 so a codepoint split across reads is
/// reassembled instead of replaced.
fn take_valid_utf8(app: &mut App, bytes: &[u8]) -> String {
    let mut data = std::mem::take(&mut app.utf8_carry);
    data.extend_from_slice(bytes);
    match String::from_utf8(data) {
        Ok(s) => s,
        Err(err) => {
            let valid_up_to = err.utf8_error().valid_up_to();
            let data = err.into_bytes();
            // Keep at most one codepoint's worth of tail; anything longer
            // is genuinely invalid and gets dropped.
            if data.len() - valid_up_to < 4 {
                app.utf8_carry = data[valid_up_to..].to_vec();
            }
            String::from_utf8_lossy(&data[..valid_up_to]).into_owned()
        }
    }
}

fn handle_key(app: &mut App, key: KeyPress) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c' | 'd') => app.should_quit = true,
            KeyCode::Char('l') => app.force_redraw = true,
            KeyCode::Char('u') => app.input.clear(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter => submit_input(app),
        KeyCode::Backspace => app.input.delete_char_before(),
        KeyCode::Delete => app.input.delete_char_after(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Up => app.scroll.up(1),
        KeyCode::Down => app.scroll.down(1),
        KeyCode::PageUp => app.scroll.up(page_lines(app)),
        KeyCode::PageDown => app.scroll.down(page_lines(app)),
        _ => {}
    }
}

fn page_lines(app: &App) -> usize {
    usize::from(app.viewport.1).saturating_sub(4).max(1)
}

pub fn handle_resize(app: &mut App, columns: u16, rows: u16) {
    app.viewport = (columns, rows);
    app.force_redraw = true;
}

/// Submit the input field: slash commands run locally, anything else
/// becomes a user message and starts an agent turn.
pub fn submit_input(app: &mut App) {
    let text = app.input.text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }

    match trimmed {
        "/clear" => {
            app.input.clear();
            app.clear_messages();
            return;
        }
        "/quit" => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    if !matches!(app.status, AppStatus::Ready) {
        // One turn at a time; the original console ignored submits
        // mid-turn as well.
        return;
    }

    app.messages.push(ChatMessage::new(Role::User, trimmed));
    app.input.clear();
    app.scroll.to_bottom();
    app.gate.reset();
    app.active_agent_msg = None;
    app.status = AppStatus::Thinking;

    let tx = app.event_tx.clone();
    app.script.send(trimmed, tx);
    tracing::debug!(chars = trimmed.len(), "submitted prompt");
}

pub fn handle_agent_event(app: &mut App, event: AgentEvent) {
    match event {
        AgentEvent::Chunk(chunk) => {
            if let Some(shown) = app.gate.on_chunk(&chunk) {
                app.append_agent_text(&shown);
                app.status = AppStatus::Streaming;
            }
        }
        AgentEvent::Done(full) => {
            let fin = app.gate.finalize(&full);
            if let Some(tail) = fin.reply {
                if !tail.is_empty() {
                    app.append_agent_text(&tail);
                }
            }
            if app.active_agent_msg.is_none() {
                match fin.action {
                    Some(action) if action != PASS_ACTION => {
                        // Machine step: the action executor is elsewhere;
                        // the transcript just notes it happened.
                        app.push_system(format!("{} requested {action}", app.agent_name));
                    }
                    _ => {
                        app.push_system("(empty reply)");
                    }
                }
            }
            app.active_agent_msg = None;
            app.status = AppStatus::Ready;
        }
        AgentEvent::Error(message) => {
            tracing::error!("agent stream failed: {message}");
            app.push_system(format!("error: {message}"));
            app.active_agent_msg = None;
            app.status = AppStatus::Ready;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typing_lands_in_field() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"gm, how are the books?");
        assert_eq!(app.input.text(), "gm, how are the books?");
    }

    #[test]
    fn wheel_scrolls_transcript() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"\x1b[<64;1;1M");
        assert_eq!(app.scroll.offset, WHEEL_SCROLL_LINES);
        handle_stdin_chunk(&mut app, b"\x1b[<65;1;1M");
        assert_eq!(app.scroll.offset, 0);
    }

    #[test]
    fn split_mouse_report_never_reaches_field() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"\x1b[<64;1;");
        handle_stdin_chunk(&mut app, b"1M");
        assert_eq!(app.input.text(), "");
        assert_eq!(app.scroll.offset, WHEEL_SCROLL_LINES);
    }

    #[test]
    fn split_utf8_codepoint_reassembled() {
        let mut app = App::test_default();
        let euro = "€".as_bytes();
        handle_stdin_chunk(&mut app, &euro[..1]);
        handle_stdin_chunk(&mut app, &euro[1..]);
        assert_eq!(app.input.text(), "€");
    }

    // submit spawns the stream task, so it needs a LocalSet underneath
    #[tokio::test]
    async fn enter_submits_and_appends_user_message() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let mut app = App::test_default();
                handle_stdin_chunk(&mut app, b"hello desk\r");
                assert_eq!(app.messages.len(), 1);
                assert_eq!(app.messages[0].role, Role::User);
                assert_eq!(app.messages[0].content, "hello desk");
                assert!(app.input.is_empty());
                assert_eq!(app.status, AppStatus::Thinking);
            })
            .await;
    }

    #[test]
    fn empty_submit_is_ignored() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"   \r");
        assert!(app.messages.is_empty());
        assert_eq!(app.status, AppStatus::Ready);
    }

    #[test]
    fn clear_command_empties_transcript() {
        let mut app = App::test_default();
        app.push_system("old line");
        handle_stdin_chunk(&mut app, b"/clear\r");
        assert!(app.messages.is_empty());
        assert!(app.input.is_empty());
    }

    #[test]
    fn quit_command_sets_flag() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"/quit\r");
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"\x03");
        assert!(app.should_quit);
    }

    #[test]
    fn reply_chunks_stream_into_agent_message() {
        let mut app = App::test_default();
        app.status = AppStatus::Thinking;
        handle_agent_event(&mut app, AgentEvent::Chunk("<actions>REPLY</actions><te".to_owned()));
        handle_agent_event(&mut app, AgentEvent::Chunk("xt>prices are ".to_owned()));
        handle_agent_event(&mut app, AgentEvent::Chunk("firm</text>".to_owned()));
        handle_agent_event(&mut app, AgentEvent::Done(String::new()));

        let agent_msgs: Vec<_> =
            app.messages.iter().filter(|m| m.role == Role::Agent).collect();
        assert_eq!(agent_msgs.len(), 1);
        assert_eq!(agent_msgs[0].content, "prices are firm");
        assert_eq!(app.status, AppStatus::Ready);
    }

    #[test]
    fn machine_turn_shows_action_note_only() {
        let mut app = App::test_default();
        app.status = AppStatus::Thinking;
        let stream = "<actions>GET_BALANCES</actions><text>Checking...</text>";
        handle_agent_event(&mut app, AgentEvent::Chunk(stream.to_owned()));
        handle_agent_event(&mut app, AgentEvent::Done(stream.to_owned()));

        assert!(app.messages.iter().all(|m| m.role != Role::Agent));
        assert!(
            app.messages
                .iter()
                .any(|m| m.role == Role::System && m.content.contains("GET_BALANCES"))
        );
    }

    #[test]
    fn finalize_fallback_without_chunks() {
        let mut app = App::test_default();
        app.status = AppStatus::Thinking;
        handle_agent_event(
            &mut app,
            AgentEvent::Done("<actions>REPLY</actions><text>late blob</text>".to_owned()),
        );
        let agent_msgs: Vec<_> =
            app.messages.iter().filter(|m| m.role == Role::Agent).collect();
        assert_eq!(agent_msgs.len(), 1);
        assert_eq!(agent_msgs[0].content, "late blob");
    }

    #[test]
    fn stream_error_becomes_system_line() {
        let mut app = App::test_default();
        app.status = AppStatus::Thinking;
        handle_agent_event(&mut app, AgentEvent::Error("connection reset".to_owned()));
        assert!(
            app.messages
                .iter()
                .any(|m| m.role == Role::System && m.content.contains("connection reset"))
        );
        assert_eq!(app.status, AppStatus::Ready);
    }

    #[test]
    fn pasted_multiline_text_survives() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"first paragraph\n\nsecond paragraph");
        assert_eq!(app.input.text(), "first paragraph\n\nsecond paragraph");
    }

    #[test]
    fn osc_title_noise_scrubbed_from_field() {
        let mut app = App::test_default();
        handle_stdin_chunk(&mut app, b"abc\x1b]0;title\x07def");
        assert_eq!(app.input.text(), "abcdef");
    }
}
