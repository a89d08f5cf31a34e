/*
equation.rs

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

//! Generate a random equation and its tiles from a pattern.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::GeneratorError;
use super::decomposition::{self, DEFAULT_MIN_PART};
use super::patterns::{self, EquationPattern, PatternName, Sign};

/// A tile that the player can select.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Tile identifier, unique in the equation.
    pub index: usize,

    /// Value between 0 and 9.
    pub value: u8,

    /// Whether the tile is part of the answer.
    pub is_correct: bool,
}

/// Status of the player's selection for an equation.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Sum of the selected tiles.
    pub selected_sum: i32,

    /// Number of selected tiles.
    pub selected_count: usize,

    /// What the selected tiles still miss to reach the result. Negative on overflow.
    pub remaining: i32,

    /// Whether the selection solves the equation.
    pub solved: bool,

    /// Whether the selected tiles sum to more than the result.
    pub overflow: bool,

    /// Whether more tiles than needed are selected.
    pub too_many_tiles: bool,
}

/// An equation built from a pattern.
///
/// The object is never stored: a new one is generated each time the pattern is presented.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEquation {
    /// Name of the source pattern.
    pub name: PatternName,

    /// Expression, such as `22 - 8`.
    pub expression: String,

    /// Result of the expression.
    pub result: i32,

    /// Number of tiles that the player must select.
    pub number_of_correct_tiles: usize,

    /// All the tiles, correct ones and decoys.
    pub tiles: Vec<Tile>,
}

impl GeneratedEquation {
    /// Return the tile with the given index.
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.index == index)
    }

    /// Return the indexes of the correct tiles, in ascending order.
    #[cfg(test)]
    pub fn correct_indexes(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self
            .tiles
            .iter()
            .filter(|t| t.is_correct)
            .map(|t| t.index)
            .collect();
        v.sort_unstable();
        v
    }

    /// Evaluate the given selection of tile indexes.
    ///
    /// Indexes that do not match a tile are ignored.
    pub fn evaluate(&self, selected: &HashSet<usize>) -> Evaluation {
        let (selected_sum, selected_count) = self
            .tiles
            .iter()
            .filter(|t| selected.contains(&t.index))
            .fold((0, 0), |(sum, count), t| (sum + i32::from(t.value), count + 1));

        Evaluation {
            selected_sum,
            selected_count,
            remaining: self.result - selected_sum,
            solved: selected_count == self.number_of_correct_tiles && selected_sum == self.result,
            overflow: selected_sum > self.result,
            too_many_tiles: selected_count > self.number_of_correct_tiles,
        }
    }
}

/// Generation settings.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    /// Preferred minimum value for the correct tiles.
    pub min_part: i32,

    /// Whether to mix the tiles. Tile indexes and correctness do not change.
    pub shuffle: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            min_part: DEFAULT_MIN_PART,
            shuffle: false,
        }
    }
}

/// Generate an equation and its tiles from the given pattern.
///
/// # Errors
///
/// The function returns an error if the pattern is malformed, or if the drawn result cannot be
/// split over the correct tiles (this is a design error in the pattern).
pub fn generate<R: Rng + ?Sized>(
    pattern: &EquationPattern,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<GeneratedEquation, GeneratorError> {
    pattern.validate()?;

    let mut expression = String::new();
    let mut sum: i64 = 0;
    for (i, operand) in pattern.operands.iter().enumerate() {
        let value: i32 = rng.random_range(operand.min..=operand.max);
        if i == 0 {
            if operand.sign == Sign::Minus {
                expression.push('-');
            }
        } else {
            expression.push(' ');
            expression.push(operand.sign.symbol());
            expression.push(' ');
        }
        expression.push_str(&value.to_string());
        sum = sum.saturating_add(operand.sign.apply(value));
    }
    let result: i32 =
        i32::try_from(sum).map_err(|_| GeneratorError::InfeasibleDistribution {
            result: patterns::saturate(sum),
            parts: pattern.number_of_correct_tiles,
        })?;
    debug!("{}: {expression} = {result}", pattern.name);

    let correct: Vec<u8> = decomposition::split_max9(
        result,
        pattern.number_of_correct_tiles,
        options.min_part,
        rng,
    )?;

    let (decoy_min, decoy_max) = pattern.decoy_range;
    let mut tiles: Vec<Tile> = Vec::with_capacity(pattern.number_of_tiles);
    for value in correct {
        tiles.push(Tile {
            index: tiles.len(),
            value,
            is_correct: true,
        });
    }
    for _ in 0..pattern.number_of_decoys() {
        tiles.push(Tile {
            index: tiles.len(),
            value: rng.random_range(decoy_min..=decoy_max),
            is_correct: false,
        });
    }
    if options.shuffle {
        tiles.shuffle(rng);
    }
    debug!("    tiles = {tiles:?}");

    Ok(GeneratedEquation {
        name: pattern.name,
        expression,
        result,
        number_of_correct_tiles: pattern.number_of_correct_tiles,
        tiles,
    })
}

/// [`Generator`] object.
///
/// The object owns its random source so that a seed gives the same sequence of equations.
#[derive(Debug, Clone)]
pub struct Generator {
    /// Generation settings.
    pub options: GeneratorOptions,

    /// Random source.
    rng: StdRng,

    /// Number of equations generated so far.
    pub count: usize,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a [`Generator`] seeded from the thread random source.
    pub fn new() -> Self {
        Self {
            options: GeneratorOptions::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            count: 0,
        }
    }

    /// Create a [`Generator`] that always produces the same equations for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        debug!("Generator seed = {seed}");
        Self {
            options: GeneratorOptions::default(),
            rng: StdRng::seed_from_u64(seed),
            count: 0,
        }
    }

    /// Change the generation settings.
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate and return a random equation for the pattern.
    ///
    /// # Errors
    ///
    /// See [`generate`].
    pub fn generate(
        &mut self,
        pattern: &EquationPattern,
    ) -> Result<GeneratedEquation, GeneratorError> {
        let equation: GeneratedEquation = generate(pattern, &self.options, &mut self.rng)?;
        self.count += 1;
        Ok(equation)
    }
}
