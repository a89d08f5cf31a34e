/*
game.rs

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

//! Save and restore the game in progress when quitting or starting Sumtiles.
//!
//! When a game is in progress and the player quits, the game status is saved in the
//! `savegame.json` file: difficulty, current step, score, mistakes, and elapsed time.
//! The equation itself is not saved. A new equation is generated for the current step when the
//! game is restored.

use log::debug;
use std::error::Error;
use std::path::PathBuf;

use crate::config::SAVEGAME_FILE;
use crate::game::Game;

/// Serialize and deserialize [`std::time::Instant`] objects with Serde.
///
/// The elapsed time is saved. When restored, the instant is set back in time by that duration.
pub mod instant {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
    use std::time::{Duration, Instant};

    /// Serialize an [`std::time::Instant`] object.
    pub fn serialize<S>(instant: &Instant, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        instant.elapsed().serialize(serializer)
    }

    /// Deserialize an [`std::time::Instant`] object.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Instant, D::Error>
    where
        D: Deserializer<'de>,
    {
        let duration: Duration = Duration::deserialize(deserializer)?;
        Instant::now()
            .checked_sub(duration)
            .ok_or_else(|| Error::custom("Cannot compute the saved game duration"))
    }
}

/// Object to save and restore a game in progress.
pub struct SaverGame {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverGame {
    /// Create a [`SaverGame`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the game must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(SAVEGAME_FILE);
        debug!("Save game file: {data_dir:?}");
        SaverGame {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`Game`] object for the saved game.
    ///
    /// Return None if there is no saved game. The returned game must be completed with
    /// [`Game::restore`] before it can be played.
    pub fn get_game(&self) -> Result<Option<Game>, Box<dyn Error>> {
        super::load_json(&self.save_file)
    }

    /// Save the provided [`Game`] object.
    pub fn save_game(&self, game: &Game) -> Result<(), Box<dyn Error>> {
        super::save_json(&self.save_file, game)
    }

    /// Delete the saved game.
    pub fn delete_save(&self) {
        super::delete_json(&self.save_file);
    }
}
