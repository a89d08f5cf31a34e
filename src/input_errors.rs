/*
input_errors.rs

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

//! Manage the player's mistake counter.
//!
//! Selecting a tile that makes the selection overflow the result, or that selects too many
//! tiles, is a mistake.

use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// The player gets three seconds to deselect the wrong tile. This way misclicks do not
/// increment the mistake counter.
const TOLERATION_SEC: u64 = 3;

fn default_toleration() -> Duration {
    Duration::from_secs(TOLERATION_SEC)
}

/// Manage the mistake counter.
#[derive(Serialize, Deserialize, Debug)]
pub struct InputErrors {
    /// Number of mistakes.
    count: usize,

    /// Tiles in error, and the time the mistake was made.
    #[serde(skip)]
    tile_set_time: HashMap<usize, Instant>,

    /// Delay during which a mistake can be fixed without penalty.
    #[serde(skip, default = "default_toleration")]
    toleration: Duration,
}

impl Default for InputErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl InputErrors {
    /// Create an [`InputErrors`] object.
    pub fn new() -> Self {
        Self {
            count: 0,
            tile_set_time: HashMap::new(),
            toleration: default_toleration(),
        }
    }

    /// Change the toleration delay.
    #[must_use]
    #[cfg(test)]
    pub fn with_toleration(mut self, toleration: Duration) -> Self {
        self.toleration = toleration;
        self
    }

    /// Reset the object.
    pub fn clear(&mut self) {
        self.count = 0;
        self.tile_set_time.clear();
    }

    /// Forget the tiles in error but keep the counter. Used when the equation changes.
    pub fn clear_tiles(&mut self) {
        self.tile_set_time.clear();
    }

    /// Return the number of mistakes.
    pub fn get_errors(&self) -> usize {
        self.count
    }

    /// Process the tile that the player just selected.
    ///
    /// A tile in error increases the counter.
    /// A tile in error that was already in error recently does not count twice.
    pub fn add_tile(&mut self, tile_index: usize, in_error: bool) {
        match self.tile_set_time.get(&tile_index) {
            Some(i) => {
                if in_error {
                    if i.elapsed() > self.toleration {
                        self.count += 1;
                        debug!("Error for tile {tile_index}: error count + 1 = {}", self.count);
                    }
                    self.tile_set_time.insert(tile_index, Instant::now());
                } else {
                    self.tile_set_time.remove(&tile_index);
                }
            }
            None => {
                if in_error {
                    self.tile_set_time.insert(tile_index, Instant::now());
                    self.count += 1;
                    debug!("Error for tile {tile_index}: error count + 1 = {}", self.count);
                }
            }
        }
    }

    /// Process the tile that the player just deselected.
    ///
    /// Deselecting a tile in error before the end of the toleration delay cancels the mistake.
    pub fn clear_tile(&mut self, tile_index: usize) {
        if let Some(i) = self.tile_set_time.remove(&tile_index)
            && i.elapsed() <= self.toleration
            && self.count > 0
        {
            self.count -= 1;
            debug!(
                "Tile {tile_index} deselected in less than {:?}: error count - 1 = {}",
                self.toleration, self.count
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mistake_is_counted() {
        let mut errors = InputErrors::new();
        errors.add_tile(3, false);
        assert_eq!(errors.get_errors(), 0);
        errors.add_tile(4, true);
        assert_eq!(errors.get_errors(), 1);
    }

    #[test]
    fn test_quick_fix_is_forgiven() {
        let mut errors = InputErrors::new().with_toleration(Duration::from_secs(60));
        errors.add_tile(4, true);
        errors.clear_tile(4);
        assert_eq!(errors.get_errors(), 0);
    }

    #[test]
    fn test_late_fix_is_not_forgiven() {
        let mut errors = InputErrors::new().with_toleration(Duration::ZERO);
        errors.add_tile(4, true);
        std::thread::sleep(Duration::from_millis(5));
        errors.clear_tile(4);
        assert_eq!(errors.get_errors(), 1);
    }

    #[test]
    fn test_repeated_error_counts_after_delay() {
        let mut errors = InputErrors::new().with_toleration(Duration::ZERO);
        errors.add_tile(1, true);
        std::thread::sleep(Duration::from_millis(5));
        errors.add_tile(1, true);
        assert_eq!(errors.get_errors(), 2);

        let mut errors = InputErrors::new().with_toleration(Duration::from_secs(60));
        errors.add_tile(1, true);
        errors.add_tile(1, true);
        assert_eq!(errors.get_errors(), 1);
    }

    #[test]
    fn test_deselecting_unknown_tile() {
        let mut errors = InputErrors::new();
        errors.clear_tile(8);
        assert_eq!(errors.get_errors(), 0);
    }

    #[test]
    fn test_counter_is_saved() {
        let mut errors = InputErrors::new();
        errors.add_tile(2, true);
        let json = serde_json::to_string(&errors).unwrap();
        let restored: InputErrors = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get_errors(), 1);
        assert_eq!(restored.toleration, Duration::from_secs(TOLERATION_SEC));
    }
}
