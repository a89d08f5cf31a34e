/*
steps.rs

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

//! Sequence of patterns for each difficulty level.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

use super::patterns::{self, EquationPattern};

/// Game difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(i32)]
pub enum Difficulty {
    #[default]
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl Difficulty {
    /// Return the difficulty for the level 1, 2, or 3. Other levels give [`Difficulty::Easy`].
    pub fn from_level(level: i32) -> Self {
        Self::from_repr(level).unwrap_or_default()
    }

    /// Points multiplier for a solved step.
    pub fn multiplier(self) -> u32 {
        self as u32
    }

    /// Number of steps with the four-operand pattern at the end of the sequence.
    fn number_of_final_steps(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }
}

/// One step of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Step number, starting at 1.
    pub step: usize,

    /// Pattern to present for this step.
    pub pattern: EquationPattern,
}

/// Return the ordered steps for the difficulty level.
///
/// All levels start with the three simple patterns, and then repeat the four-operand pattern.
pub fn steps_for(difficulty: Difficulty) -> Vec<Step> {
    let mut list: Vec<EquationPattern> =
        vec![patterns::pattern_1(), patterns::pattern_2(), patterns::pattern_3()];
    list.extend(std::iter::repeat_n(
        patterns::pattern_x(),
        difficulty.number_of_final_steps(),
    ));
    list.into_iter()
        .enumerate()
        .map(|(i, pattern)| Step { step: i + 1, pattern })
        .collect()
}
