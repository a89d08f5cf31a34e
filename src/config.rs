/*
config.rs

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

//! Application constants and location of the data files.

use log::debug;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Application name, also used for the data directory.
pub const APP_NAME: &str = "sumtiles";

/// Notice displayed by `--version`.
pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SUMTILES_DATA_DIR";

/// File that stores the high scores.
pub const HIGHSCORES_FILE: &str = "highscores.json";

/// File that stores the game in progress.
pub const SAVEGAME_FILE: &str = "savegame.json";

/// Return the directory where the high scores and the saved game are stored.
///
/// In order, use the provided directory, the `SUMTILES_DATA_DIR` environment variable,
/// `$XDG_DATA_HOME/sumtiles`, and then `$HOME/.local/share/sumtiles`.
/// If none of these can be found, then use the current directory.
pub fn data_dir(dir: Option<PathBuf>) -> PathBuf {
    if let Some(d) = dir {
        return d;
    }
    if let Some(d) = env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(d);
    }
    if let Some(d) = env::var_os("XDG_DATA_HOME").filter(|d| !d.is_empty()) {
        return PathBuf::from(d).join(APP_NAME);
    }
    match env::var_os("HOME").filter(|d| !d.is_empty()) {
        Some(home) => PathBuf::from(home).join(".local").join("share").join(APP_NAME),
        None => PathBuf::from("."),
    }
}

/// Return the data directory, creating it if needed.
///
/// # Errors
///
/// Return the I/O error if the directory cannot be created.
pub fn ensure_data_dir(dir: Option<PathBuf>) -> io::Result<PathBuf> {
    let d: PathBuf = data_dir(dir);
    fs::create_dir_all(&d)?;
    debug!("Data directory: {d:?}");
    Ok(d)
}
