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

pub mod agent;
pub mod app;
pub mod error;
pub mod term;
pub mod ui;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tickertalk", about = "Terminal chat console for an AI trading agent")]
pub struct Cli {
    /// JSON file of scripted agent turns (defaults to the built-in demo)
    #[arg(long)]
    pub script: Option<std::path::PathBuf>,

    /// Display name for the agent
    #[arg(long, default_value = "Dex")]
    pub name: String,

    /// Write diagnostics to this file (tracing is disabled otherwise)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (falls back to RUST_LOG, then "info")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
