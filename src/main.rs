/*
main.rs

Copyright 2025 Hervé Quatremain

This file is part of Sumtiles.

Sumtiles is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Sumtiles is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Sumtiles. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

mod cli_options;
mod config;
mod game;
mod generator;
mod highscores;
mod input_errors;
mod saver;
mod terminal;
mod tile_selection;

use log::error;
use std::process::ExitCode;

use cli_options::CliAction;

fn main() -> ExitCode {
    let options: terminal::PlayOptions = match cli_options::parse() {
        CliAction::Exit(ret) => return ExitCode::from(ret),
        CliAction::Play(options) => options,
    };

    match terminal::play(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
