/*
tile_selection.rs

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

//! Manage the tiles that the player selected.
//!
//! The module manages the selected tile indexes, as well as the undo and redo lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::generator::equation::{Evaluation, GeneratedEquation};

/// Undo and redo operations.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Select,
    Deselect,
}

/// Operation performed by the player, stored in the undo and redo lists.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
struct DoOperation {
    /// Operation: [`Operation::Select`] or [`Operation::Deselect`].
    operation: Operation,

    /// Tile index.
    tile_index: usize,
}

/// Manage the tiles that the player selected.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TileSelection {
    /// Indexes of the selected tiles.
    selected: HashSet<usize>,

    /// List of undo operations.
    undo_op: Vec<DoOperation>,

    /// List of redo operations.
    redo_op: Vec<DoOperation>,
}

impl TileSelection {
    /// Create a [`TileSelection`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the object.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.undo_op.clear();
        self.redo_op.clear();
    }

    /// Whether the tile is selected.
    pub fn contains(&self, tile_index: usize) -> bool {
        self.selected.contains(&tile_index)
    }

    /// Return the number of selected tiles.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether no tile is selected.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Apply an operation without updating the undo and redo lists.
    fn apply(&mut self, operation: Operation, tile_index: usize) {
        match operation {
            Operation::Select => {
                self.selected.insert(tile_index);
            }
            Operation::Deselect => {
                self.selected.remove(&tile_index);
            }
        }
    }

    /// Select the tile if it is not selected, deselect it otherwise.
    ///
    /// Return whether the tile is now selected.
    pub fn toggle(&mut self, tile_index: usize) -> bool {
        let operation: Operation = if self.contains(tile_index) {
            Operation::Deselect
        } else {
            Operation::Select
        };
        self.apply(operation, tile_index);
        self.undo_op.push(DoOperation {
            operation,
            tile_index,
        });
        self.redo_op.clear();
        operation == Operation::Select
    }

    /// Undo the last operation.
    ///
    /// Return the index of the tile that changed and whether it is now selected.
    pub fn undo(&mut self) -> Option<(usize, bool)> {
        let op: DoOperation = self.undo_op.pop()?;
        let reverse: Operation = match op.operation {
            Operation::Select => Operation::Deselect,
            Operation::Deselect => Operation::Select,
        };
        self.apply(reverse, op.tile_index);
        self.redo_op.push(op);
        Some((op.tile_index, reverse == Operation::Select))
    }

    /// Redo the last undo operation.
    ///
    /// Return the index of the tile that changed and whether it is now selected.
    pub fn redo(&mut self) -> Option<(usize, bool)> {
        let op: DoOperation = self.redo_op.pop()?;
        self.apply(op.operation, op.tile_index);
        self.undo_op.push(op);
        Some((op.tile_index, op.operation == Operation::Select))
    }

    /// Return the length of the undo list.
    #[cfg(test)]
    pub fn undo_len(&self) -> usize {
        self.undo_op.len()
    }

    /// Return the length of the redo list.
    #[cfg(test)]
    pub fn redo_len(&self) -> usize {
        self.redo_op.len()
    }

    /// Evaluate the selection against the equation.
    pub fn evaluate(&self, equation: &GeneratedEquation) -> Evaluation {
        equation.evaluate(&self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = TileSelection::new();
        assert!(selection.toggle(2));
        assert!(selection.toggle(4));
        assert!(selection.contains(2));
        assert_eq!(selection.len(), 2);

        assert!(!selection.toggle(2));
        assert!(!selection.contains(2));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.undo_len(), 3);
    }

    #[test]
    fn test_undo_redo() {
        let mut selection = TileSelection::new();
        selection.toggle(1);
        selection.toggle(3);
        selection.toggle(1);

        assert_eq!(selection.undo(), Some((1, true)));
        assert!(selection.contains(1));
        assert_eq!(selection.undo(), Some((3, false)));
        assert!(!selection.contains(3));
        assert_eq!(selection.redo_len(), 2);

        assert_eq!(selection.redo(), Some((3, true)));
        assert!(selection.contains(3));

        // A new operation drops the redo list
        selection.toggle(0);
        assert_eq!(selection.redo_len(), 0);
        assert_eq!(selection.redo(), None);
    }

    #[test]
    fn test_undo_empty() {
        let mut selection = TileSelection::new();
        assert_eq!(selection.undo(), None);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut selection = TileSelection::new();
        selection.toggle(5);
        selection.undo();
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.undo_len(), 0);
        assert_eq!(selection.redo_len(), 0);
    }
}
