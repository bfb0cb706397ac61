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

//! Raw terminal input decoding.
//!
//! The console reads stdin bytes itself instead of going through a terminal
//! library's event parser: the same byte stream carries keystrokes, pasted
//! text and mouse reports, and each of those goes somewhere different.
//! [`TerminalInput`] is the single entry point; [`scrub`], [`wheel`] and
//! [`keys`] are the three concerns it composes.

pub mod input;
pub mod keys;
pub mod scrub;
pub mod wheel;

pub use input::{InputUpdate, TerminalInput};
pub use keys::{KeyPress, StreamItem};
