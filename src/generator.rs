/*
generator.rs

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

//! Manage equation patterns and generate random equations with their tiles.
//!
//! [`patterns::EquationPattern`] objects are templates: they give a range for each operand, the
//! sign of each operand, and how many tiles the player gets.
//! The list of built-in patterns is provided by [`patterns::pattern_map`].
//!
//! To play a step, a random equation must be created from a pattern.
//! You create it by creating a [`equation::Generator`] object and by using its
//! [`equation::Generator::generate`] method.
//! The returned [`equation::GeneratedEquation`] object contains:
//!
//! * The expression string (`"22 - 8"` for example) and its result.
//!
//! * The tiles.
//!   The first tiles are the correct tiles: their values sum to the result.
//!   The values are computed by [`decomposition::split_max9`].
//!   The remaining tiles are decoys with random values.
//!
//! The order in which patterns are presented to the player depends on the difficulty level.
//! See [`steps::steps_for`].

pub mod decomposition;
pub mod equation;
pub mod patterns;
pub mod steps;

use thiserror::Error;

/// Type of errors.
///
/// All these errors are deterministic: retrying with the same pattern does not help.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// The pattern is malformed (empty operand range, no correct tiles, not enough tiles...)
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// The result cannot be spread over the correct tiles without leaving the 0-9 range.
    #[error("cannot split {result} into {parts} tiles with values between 0 and 9")]
    InfeasibleDistribution { result: i32, parts: usize },

    /// The decomposition produced wrong values. This is a bug.
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),
}
