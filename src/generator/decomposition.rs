/*
decomposition.rs

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

//! Split a number into single-digit parts.

use log::debug;
use rand::Rng;

use super::GeneratorError;

/// Largest value for a tile.
pub const MAX_TILE_VALUE: i32 = 9;

/// Preferred smallest value for a correct tile. Lowered when the total is too small.
pub const DEFAULT_MIN_PART: i32 = 4;

/// Split `total` into `parts` values between 0 and 9 whose sum is `total`.
///
/// Each part gets at least `min` when possible. If `total` is too small for that, then the
/// minimum is lowered to `total / parts` for all the parts.
///
/// The parts are chosen from left to right. For each part, the value is drawn in the range that
/// still lets the following parts receive the minimum.
///
/// # Errors
///
/// * [`GeneratorError::InvalidPattern`] if `parts` is zero or larger than `i32::MAX`, or if
///   `min` is negative.
/// * [`GeneratorError::InfeasibleDistribution`] if `total` is negative or larger than
///   `parts * 9`.
/// * [`GeneratorError::InternalConsistency`] if the final parts are wrong, which is a bug.
pub fn split_max9<R: Rng + ?Sized>(
    total: i32,
    parts: usize,
    min: i32,
    rng: &mut R,
) -> Result<Vec<u8>, GeneratorError> {
    if parts == 0 || min < 0 {
        return Err(GeneratorError::InvalidPattern(format!(
            "cannot split into {parts} parts with a minimum of {min}"
        )));
    }
    let num_parts: i32 = i32::try_from(parts).map_err(|_| {
        GeneratorError::InvalidPattern(format!("cannot split into {parts} parts"))
    })?;
    // Past i32::MAX, the largest total always fits
    let max_total: i32 = num_parts.checked_mul(MAX_TILE_VALUE).unwrap_or(i32::MAX);
    if total < 0 || total > max_total {
        return Err(GeneratorError::InfeasibleDistribution {
            result: total,
            parts,
        });
    }

    // All the parts cannot get the minimum: spread the total as evenly as possible instead
    let effective_min: i32 = match num_parts.checked_mul(min) {
        Some(needed) if total >= needed => min.min(MAX_TILE_VALUE),
        _ => (total / num_parts).min(MAX_TILE_VALUE),
    };
    debug!("Splitting {total} into {parts} parts (minimum {effective_min})");

    let mut values: Vec<i32> = Vec::new();
    let mut remaining: i32 = total;
    for i in 0..num_parts {
        let parts_left: i32 = num_parts - i - 1;

        // Keep enough for the following parts to receive the minimum
        let max_possible: i32 = MAX_TILE_VALUE.min(remaining - parts_left * effective_min);
        let min_possible: i32 = effective_min.max(0);
        let lower: i32 = min_possible.min(max_possible);
        let upper: i32 = min_possible.max(max_possible);

        let value: i32 = if lower == upper {
            lower
        } else {
            rng.random_range(lower..=upper)
        };
        values.push(value);
        remaining -= value;
    }

    // The last parts are capped at 9, so some of the total might be left
    if remaining != 0 {
        debug!("    {remaining} left after {values:?}");
        for value in values.iter_mut() {
            if remaining == 0 {
                break;
            }
            let space: i32 = if remaining > 0 {
                (MAX_TILE_VALUE - *value).min(remaining)
            } else {
                (-*value).max(remaining)
            };
            *value += space;
            remaining -= space;
        }
    }

    let sum: i32 = values.iter().sum();
    if sum != total || values.iter().any(|v| !(0..=MAX_TILE_VALUE).contains(v)) {
        return Err(GeneratorError::InternalConsistency(format!(
            "{values:?} does not split {total}"
        )));
    }
    debug!("    parts = {values:?}");

    Ok(values.into_iter().map(|v| v as u8).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_scenario_eighteen_in_three() {
        let mut rng = StdRng::seed_from_u64(18);
        for _ in 0..100 {
            let parts = split_max9(18, 3, DEFAULT_MIN_PART, &mut rng).unwrap();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts.iter().map(|p| *p as i32).sum::<i32>(), 18);
            assert!(parts.iter().all(|p| *p <= 9));
        }
    }

    #[test]
    fn test_maximum_is_all_nines() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(split_max9(27, 3, DEFAULT_MIN_PART, &mut rng).unwrap(), vec![9, 9, 9]);
        assert_eq!(
            split_max9(36, 4, DEFAULT_MIN_PART, &mut rng).unwrap(),
            vec![9, 9, 9, 9]
        );
    }

    #[test]
    fn test_zero_is_all_zeros() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(split_max9(0, 3, DEFAULT_MIN_PART, &mut rng).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_small_total_relaxes_minimum() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            // 4 + 4 + 4 > 7, so the minimum drops to 2
            let parts = split_max9(7, 3, DEFAULT_MIN_PART, &mut rng).unwrap();
            assert_eq!(parts.iter().map(|p| *p as i32).sum::<i32>(), 7);
            assert!(parts.iter().all(|p| *p >= 2));
        }
    }

    #[test]
    fn test_minimum_is_honored() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let parts = split_max9(20, 4, DEFAULT_MIN_PART, &mut rng).unwrap();
            assert!(parts.iter().all(|p| *p >= 4));
        }
    }

    #[test]
    fn test_errors() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            split_max9(-1, 3, 0, &mut rng),
            Err(GeneratorError::InfeasibleDistribution {
                result: -1,
                parts: 3
            })
        );
        assert_eq!(
            split_max9(28, 3, 0, &mut rng),
            Err(GeneratorError::InfeasibleDistribution {
                result: 28,
                parts: 3
            })
        );
        assert!(matches!(
            split_max9(5, 0, 0, &mut rng),
            Err(GeneratorError::InvalidPattern(_))
        ));
        assert!(matches!(
            split_max9(5, 2, -1, &mut rng),
            Err(GeneratorError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_part_count_above_i32() {
        let mut rng = StdRng::seed_from_u64(6);
        let parts: usize = i32::MAX as usize + 3;
        assert!(matches!(
            split_max9(5, parts, 0, &mut rng),
            Err(GeneratorError::InvalidPattern(_))
        ));
        assert!(matches!(
            split_max9(i32::MAX, parts, DEFAULT_MIN_PART, &mut rng),
            Err(GeneratorError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_large_minimum() {
        let mut rng = StdRng::seed_from_u64(7);
        // 3 * i32::MAX overflows: the minimum is relaxed to 27 / 3 and capped at 9
        assert_eq!(split_max9(27, 3, i32::MAX, &mut rng).unwrap(), vec![9, 9, 9]);
        assert_eq!(split_max9(6, 3, i32::MAX, &mut rng).unwrap(), vec![2, 2, 2]);
    }

    proptest! {
        #[test]
        fn prop_parts_sum_to_total(
            parts in 1usize..6,
            fill in 0.0f64..=1.0,
            min in 0i32..10,
            seed in any::<u64>(),
        ) {
            let total = (fill * (parts as f64) * 9.0).round() as i32;
            let mut rng = StdRng::seed_from_u64(seed);
            let values = split_max9(total, parts, min, &mut rng).unwrap();
            prop_assert_eq!(values.len(), parts);
            prop_assert_eq!(values.iter().map(|v| *v as i32).sum::<i32>(), total);
            prop_assert!(values.iter().all(|v| *v <= 9));
        }
    }
}
