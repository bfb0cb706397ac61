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

mod events;
mod input;
mod state;

pub use input::InputState;
pub use state::{App, AppStatus, ChatMessage, Role, ScrollState};

use crate::Cli;
use crate::agent::ScriptedAgent;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt as _;

/// Frame tick; also paces the spinner.
const TICK: Duration = Duration::from_millis(33);

#[must_use]
pub fn create_app(cli: &Cli, script: ScriptedAgent) -> App {
    let mut app = App::new(cli.name.clone(), script);
    if let Ok(size) = crossterm::terminal::size() {
        app.viewport = size;
    }
    app.push_system(format!(
        "connected to {} — Enter sends, /clear resets, Ctrl+C quits",
        app.agent_name
    ));
    app
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

/// Single-threaded cooperative loop: raw stdin bytes, agent events and the
/// frame tick are the only wake-ups. All decoder state is mutated
/// synchronously inside the handler for one event before the next is
/// looked at.
pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Mouse capture gives us SGR wheel reports on stdin. Input is read and
    // decoded by this crate; crossterm's event stream stays out of the way.
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let mut stdin = tokio::io::stdin();
    let mut read_buf = [0u8; 4096];
    let mut last_render = Instant::now();

    loop {
        // Phase 1: wait for one event or the next frame tick
        let time_to_next = TICK.saturating_sub(last_render.elapsed());
        tokio::select! {
            read = stdin.read(&mut read_buf) => match read {
                Ok(0) => app.should_quit = true, // stdin closed
                Ok(n) => events::handle_stdin_chunk(app, &read_buf[..n]),
                Err(e) => {
                    tracing::error!("stdin read failed: {e}");
                    app.should_quit = true;
                }
            },
            Some(event) = app.event_rx.recv() => {
                events::handle_agent_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain queued agent events (non-blocking)
        while let Ok(event) = app.event_rx.try_recv() {
            events::handle_agent_event(app, event);
        }

        if app.should_quit {
            break;
        }

        // Phase 3: render once
        if let Ok(size) = crossterm::terminal::size() {
            if size != app.viewport {
                events::handle_resize(app, size.0, size.1);
            }
        }
        if matches!(app.status, AppStatus::Thinking | AppStatus::Streaming) {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
        }
        if app.force_redraw {
            terminal.clear()?;
            app.force_redraw = false;
        }
        terminal.draw(|f| crate::ui::render(f, app))?;
        last_render = Instant::now();
    }

    // Restore terminal
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();

    Ok(())
}
