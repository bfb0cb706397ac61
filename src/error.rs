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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("script file not found: {0}")]
    ScriptNotFound(String),
    #[error("script file invalid: {0}")]
    ScriptInvalid(String),
    #[error("terminal unavailable")]
    TerminalUnavailable,
}

impl AppError {
    pub const SCRIPT_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const SCRIPT_INVALID_EXIT_CODE: i32 = 21;
    pub const TERMINAL_UNAVAILABLE_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptNotFound(_) => Self::SCRIPT_NOT_FOUND_EXIT_CODE,
            Self::ScriptInvalid(_) => Self::SCRIPT_INVALID_EXIT_CODE,
            Self::TerminalUnavailable => Self::TERMINAL_UNAVAILABLE_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ScriptNotFound(path) => {
                format!("Script file not found: {path}. Check the --script path.")
            }
            Self::ScriptInvalid(detail) => {
                format!(
                    "Script file is not valid: {detail}. Expected {{\"turns\": [[\"chunk\", ...], ...]}}."
                )
            }
            Self::TerminalUnavailable => {
                "Could not take over the terminal. Run tickertalk from an interactive terminal."
                    .to_owned()
            }
        }
    }
}
