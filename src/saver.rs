/*
saver.rs

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

//! Save and restore objects in JSON files in the data directory.
//!
//! * [`game::SaverGame`] saves the game in progress.
//! * [`highscores::SaverHighScores`] saves the scoreboards.

pub mod game;
pub mod highscores;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Read the object from the JSON file.
///
/// Return None if the file does not exist.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, Box<dyn Error>> {
    let file: File = match File::open(path) {
        Ok(f) => f,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(Box::new(error)),
    };
    let reader: BufReader<File> = BufReader::new(file);
    let object: T = serde_json::from_reader(reader)?;
    Ok(Some(object))
}

/// Write the object to the JSON file.
fn save_json<T: Serialize>(path: &Path, object: &T) -> Result<(), Box<dyn Error>> {
    let file: File = File::create(path)?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    serde_json::to_writer(&mut writer, object)?;
    writer.flush()?;
    Ok(())
}

/// Delete the file. Errors are ignored.
fn delete_json(path: &Path) {
    let _ = remove_file(path);
}
