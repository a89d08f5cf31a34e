/*
patterns.rs

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

//! Equation patterns.
//!
//! A pattern only holds data: the operand ranges, their signs, and the tile counts.
//! The generator never looks at the pattern name to decide how to build the equation.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::GeneratorError;
use super::decomposition::MAX_TILE_VALUE;

/// Largest number of tiles that a pattern can present.
pub const MAX_TILES: usize = 64;

/// Range used for the decoy tiles when the pattern does not define one.
pub const DEFAULT_DECOY_RANGE: (u8, u8) = (3, 9);

/// Pattern identifiers.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum,
)]
pub enum PatternName {
    #[serde(rename = "PATTERN_1")]
    #[value(name = "PATTERN_1", alias = "1")]
    Pattern1,

    #[serde(rename = "PATTERN_2")]
    #[value(name = "PATTERN_2", alias = "2")]
    Pattern2,

    #[serde(rename = "PATTERN_3")]
    #[value(name = "PATTERN_3", alias = "3")]
    Pattern3,

    #[serde(rename = "PATTERN_X")]
    #[value(name = "PATTERN_X", aliases = ["X", "x"])]
    PatternX,
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PatternName::Pattern1 => write!(f, "PATTERN_1"),
            PatternName::Pattern2 => write!(f, "PATTERN_2"),
            PatternName::Pattern3 => write!(f, "PATTERN_3"),
            PatternName::PatternX => write!(f, "PATTERN_X"),
        }
    }
}

/// Sign of an operand in the equation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// Return the signed value.
    ///
    /// The value is widened so that negating `i32::MIN` cannot overflow.
    pub fn apply(self, value: i32) -> i64 {
        let value: i64 = i64::from(value);
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    /// Operator displayed in front of the operand.
    pub fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// One operand slot of a pattern.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Operand {
    /// Sign of the operand. The sign of the first operand is not displayed.
    pub sign: Sign,

    /// Smallest value (inclusive).
    pub min: i32,

    /// Largest value (inclusive).
    pub max: i32,
}

/// Template for generating equations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EquationPattern {
    /// Pattern identifier.
    pub name: PatternName,

    /// Operand slots, in display order.
    pub operands: Vec<Operand>,

    /// Number of tiles that the player must select.
    pub number_of_correct_tiles: usize,

    /// Total number of tiles: correct tiles and decoys.
    pub number_of_tiles: usize,

    /// Inclusive range for the decoy values.
    pub decoy_range: (u8, u8),
}

impl EquationPattern {
    /// Create a pattern without operands. Use [`EquationPattern::with_operand`] to add them.
    pub fn new(name: PatternName, number_of_correct_tiles: usize, number_of_tiles: usize) -> Self {
        Self {
            name,
            operands: Vec::with_capacity(4),
            number_of_correct_tiles,
            number_of_tiles,
            decoy_range: DEFAULT_DECOY_RANGE,
        }
    }

    /// Add an operand slot.
    #[must_use]
    pub fn with_operand(mut self, sign: Sign, min: i32, max: i32) -> Self {
        self.operands.push(Operand { sign, min, max });
        self
    }

    /// Return the operand ranges.
    pub fn ranges(&self) -> Vec<(i32, i32)> {
        self.operands.iter().map(|o| (o.min, o.max)).collect()
    }

    /// Number of decoy tiles.
    pub fn number_of_decoys(&self) -> usize {
        self.number_of_tiles.saturating_sub(self.number_of_correct_tiles)
    }

    /// Verify that the pattern can be used by the generator.
    ///
    /// # Errors
    ///
    /// Return [`GeneratorError::InvalidPattern`] when a range is empty, when there are no
    /// operands or no correct tiles, when there are fewer tiles than correct tiles, or when the
    /// total number of tiles is larger than [`MAX_TILES`].
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.operands.is_empty() {
            return Err(GeneratorError::InvalidPattern(format!(
                "{}: no operands",
                self.name
            )));
        }
        for (i, operand) in self.operands.iter().enumerate() {
            if operand.min > operand.max {
                return Err(GeneratorError::InvalidPattern(format!(
                    "{}: operand {} has min {} > max {}",
                    self.name, i, operand.min, operand.max
                )));
            }
        }
        if self.number_of_correct_tiles == 0 {
            return Err(GeneratorError::InvalidPattern(format!(
                "{}: the number of correct tiles must be positive",
                self.name
            )));
        }
        if self.number_of_tiles < self.number_of_correct_tiles {
            return Err(GeneratorError::InvalidPattern(format!(
                "{}: {} tiles cannot hold {} correct tiles",
                self.name, self.number_of_tiles, self.number_of_correct_tiles
            )));
        }
        if self.number_of_tiles > MAX_TILES {
            return Err(GeneratorError::InvalidPattern(format!(
                "{}: {} tiles, the maximum is {MAX_TILES}",
                self.name, self.number_of_tiles
            )));
        }
        let (decoy_min, decoy_max) = self.decoy_range;
        if decoy_min > decoy_max || i32::from(decoy_max) > MAX_TILE_VALUE {
            return Err(GeneratorError::InvalidPattern(format!(
                "{}: wrong decoy range {decoy_min}-{decoy_max}",
                self.name
            )));
        }
        Ok(())
    }

    /// Return the smallest and the largest result that a draw can produce.
    ///
    /// The bounds are computed on 64 bits: they can be outside the `i32` range.
    pub fn result_bounds(&self) -> (i64, i64) {
        self.operands.iter().fold((0, 0), |(low, high), o| {
            let a: i64 = o.sign.apply(o.min);
            let b: i64 = o.sign.apply(o.max);
            (low.saturating_add(a.min(b)), high.saturating_add(a.max(b)))
        })
    }

    /// Verify that every possible draw can be spread over the correct tiles.
    ///
    /// # Errors
    ///
    /// Return [`GeneratorError::InvalidPattern`] for malformed patterns, or
    /// [`GeneratorError::InfeasibleDistribution`] with the first result that cannot be split.
    /// A result outside the `i32` range is reported as `i32::MIN` or `i32::MAX`.
    pub fn check_feasible(&self) -> Result<(), GeneratorError> {
        self.validate()?;
        let (low, high) = self.result_bounds();
        debug!("{}: results between {low} and {high}", self.name);
        let parts: usize = self.number_of_correct_tiles;
        let max_total: i64 = i64::try_from(parts)
            .map_or(i64::MAX, |p| p.saturating_mul(i64::from(MAX_TILE_VALUE)));
        if low < 0 {
            return Err(GeneratorError::InfeasibleDistribution {
                result: saturate(low),
                parts,
            });
        }
        if high > max_total {
            return Err(GeneratorError::InfeasibleDistribution {
                result: saturate(high),
                parts,
            });
        }
        Ok(())
    }

    /// Return the arithmetic form with letters, such as `a + b - c`.
    pub fn form(&self) -> String {
        let mut s = String::new();
        for (i, operand) in self.operands.iter().enumerate() {
            let letter: char = (b'a' + (i % 26) as u8) as char;
            if i == 0 {
                if operand.sign == Sign::Minus {
                    s.push('-');
                }
            } else {
                s.push(' ');
                s.push(operand.sign.symbol());
                s.push(' ');
            }
            s.push(letter);
        }
        s
    }
}

/// Addition of two operands: `a + bb`.
///
/// From 7 + 11 = 18 to 9 + 18 = 27.
pub fn pattern_1() -> EquationPattern {
    EquationPattern::new(PatternName::Pattern1, 3, 6)
        .with_operand(Sign::Plus, 7, 9)
        .with_operand(Sign::Plus, 11, 18)
}

/// Subtraction: `aa - b`.
///
/// From 22 - 8 = 14 to 29 - 6 = 23.
pub fn pattern_2() -> EquationPattern {
    EquationPattern::new(PatternName::Pattern2, 3, 6)
        .with_operand(Sign::Plus, 22, 29)
        .with_operand(Sign::Minus, 6, 8)
}

/// Addition then subtraction: `aa + b - c`.
///
/// From 15 + 6 - 5 = 16 to 21 + 9 - 3 = 27.
pub fn pattern_3() -> EquationPattern {
    EquationPattern::new(PatternName::Pattern3, 3, 6)
        .with_operand(Sign::Plus, 15, 21)
        .with_operand(Sign::Plus, 6, 9)
        .with_operand(Sign::Minus, 3, 5)
}

/// Four operands: `a + b + cc - dd`.
///
/// From 7 + 6 + 20 - 15 = 18 to 9 + 9 + 25 - 11 = 32.
pub fn pattern_x() -> EquationPattern {
    EquationPattern::new(PatternName::PatternX, 4, 8)
        .with_operand(Sign::Plus, 7, 9)
        .with_operand(Sign::Plus, 6, 9)
        .with_operand(Sign::Plus, 20, 25)
        .with_operand(Sign::Minus, 11, 15)
}

/// Convert a 64-bit result to `i32`, clamping to the `i32` range.
pub fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Return the pattern with the given name.
pub fn get(name: PatternName) -> EquationPattern {
    match name {
        PatternName::Pattern1 => pattern_1(),
        PatternName::Pattern2 => pattern_2(),
        PatternName::Pattern3 => pattern_3(),
        PatternName::PatternX => pattern_x(),
    }
}

/// Return the built-in patterns, indexed by name.
pub fn pattern_map() -> HashMap<PatternName, EquationPattern> {
    PatternName::value_variants()
        .iter()
        .map(|name| (*name, get(*name)))
        .collect()
}

/// Verify all the given patterns and return the errors, one per faulty pattern.
pub fn validate_pattern_table<'a, I>(patterns: I) -> Vec<GeneratorError>
where
    I: IntoIterator<Item = &'a EquationPattern>,
{
    patterns
        .into_iter()
        .filter_map(|p| p.check_feasible().err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_patterns_are_feasible() {
        let map = pattern_map();
        assert_eq!(map.len(), 4);
        assert!(validate_pattern_table(map.values()).is_empty());
    }

    #[test]
    fn test_result_bounds() {
        assert_eq!(pattern_1().result_bounds(), (18, 27));
        assert_eq!(pattern_2().result_bounds(), (14, 23));
        assert_eq!(pattern_3().result_bounds(), (16, 27));
        assert_eq!(pattern_x().result_bounds(), (18, 32));
    }

    #[test]
    fn test_form() {
        assert_eq!(pattern_1().form(), "a + b");
        assert_eq!(pattern_2().form(), "a - b");
        assert_eq!(pattern_3().form(), "a + b - c");
        assert_eq!(pattern_x().form(), "a + b + c - d");
    }

    #[test]
    fn test_tile_counts() {
        let p = pattern_x();
        assert_eq!(p.number_of_correct_tiles, 4);
        assert_eq!(p.number_of_decoys(), 4);
        assert_eq!(p.ranges(), vec![(7, 9), (6, 9), (20, 25), (11, 15)]);
    }

    #[test]
    fn test_invalid_patterns() {
        let reversed = EquationPattern::new(PatternName::Pattern1, 3, 6)
            .with_operand(Sign::Plus, 9, 7)
            .with_operand(Sign::Plus, 11, 18);
        assert!(matches!(
            reversed.validate(),
            Err(GeneratorError::InvalidPattern(_))
        ));

        let no_correct = EquationPattern::new(PatternName::Pattern1, 0, 6)
            .with_operand(Sign::Plus, 7, 9);
        assert!(matches!(
            no_correct.validate(),
            Err(GeneratorError::InvalidPattern(_))
        ));

        let too_few_tiles = EquationPattern::new(PatternName::Pattern1, 4, 3)
            .with_operand(Sign::Plus, 7, 9);
        assert!(matches!(
            too_few_tiles.validate(),
            Err(GeneratorError::InvalidPattern(_))
        ));

        let no_operand = EquationPattern::new(PatternName::Pattern1, 3, 6);
        assert!(no_operand.validate().is_err());

        let mut bad_decoys = pattern_1();
        bad_decoys.decoy_range = (3, 12);
        assert!(bad_decoys.validate().is_err());
        bad_decoys.decoy_range = (8, 4);
        assert!(bad_decoys.validate().is_err());

        let too_many_tiles = EquationPattern::new(PatternName::PatternX, 4, MAX_TILES + 1)
            .with_operand(Sign::Plus, 7, 9);
        assert!(matches!(
            too_many_tiles.validate(),
            Err(GeneratorError::InvalidPattern(_))
        ));
        let huge = EquationPattern::new(PatternName::PatternX, usize::MAX, usize::MAX)
            .with_operand(Sign::Plus, 7, 9);
        assert!(matches!(
            huge.validate(),
            Err(GeneratorError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_infeasible_patterns() {
        let too_large = EquationPattern::new(PatternName::Pattern1, 3, 6)
            .with_operand(Sign::Plus, 20, 20)
            .with_operand(Sign::Plus, 8, 8);
        assert_eq!(
            too_large.check_feasible(),
            Err(GeneratorError::InfeasibleDistribution {
                result: 28,
                parts: 3
            })
        );

        let negative = EquationPattern::new(PatternName::Pattern2, 3, 6)
            .with_operand(Sign::Plus, 5, 10)
            .with_operand(Sign::Minus, 6, 8);
        assert_eq!(
            negative.check_feasible(),
            Err(GeneratorError::InfeasibleDistribution {
                result: -3,
                parts: 3
            })
        );
        assert_eq!(validate_pattern_table([&too_large, &negative]).len(), 2);
    }

    #[test]
    fn test_extreme_operands() {
        assert_eq!(Sign::Minus.apply(i32::MIN), 2_147_483_648);

        let negated_min = EquationPattern::new(PatternName::Pattern2, 3, 6)
            .with_operand(Sign::Minus, i32::MIN, i32::MIN);
        assert!(negated_min.validate().is_ok());
        assert_eq!(negated_min.result_bounds(), (2_147_483_648, 2_147_483_648));
        assert_eq!(
            negated_min.check_feasible(),
            Err(GeneratorError::InfeasibleDistribution {
                result: i32::MAX,
                parts: 3
            })
        );

        let above_max = EquationPattern::new(PatternName::Pattern1, 3, 6)
            .with_operand(Sign::Plus, i32::MAX, i32::MAX)
            .with_operand(Sign::Plus, 1, 1);
        assert_eq!(
            above_max.check_feasible(),
            Err(GeneratorError::InfeasibleDistribution {
                result: i32::MAX,
                parts: 3
            })
        );

        let below_min = EquationPattern::new(PatternName::Pattern2, 3, 6)
            .with_operand(Sign::Plus, i32::MIN, i32::MIN)
            .with_operand(Sign::Minus, 1, 1);
        assert_eq!(
            below_min.check_feasible(),
            Err(GeneratorError::InfeasibleDistribution {
                result: i32::MIN,
                parts: 3
            })
        );
        assert_eq!(saturate(-5), -5);
    }

    #[test]
    fn test_pattern_name_serde() {
        let json = serde_json::to_string(&PatternName::PatternX).unwrap();
        assert_eq!(json, "\"PATTERN_X\"");
        let name: PatternName = serde_json::from_str("\"PATTERN_2\"").unwrap();
        assert_eq!(name, PatternName::Pattern2);
        assert_eq!(PatternName::Pattern3.to_string(), "PATTERN_3");
    }
}
