/*
highscores.rs

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

//! Manage high scores for each difficulty level.
//!
//! The main object, [`HighScores`], maintains a scoreboard for each difficulty level.
//! This object is saved when the player completes a game and makes it to the scoreboard, and
//! is restored when Sumtiles starts.
//! See the [`crate::saver::highscores`] module that saves and restores the [`HighScores`] object.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::generator::steps::Difficulty;

/// Number of entries per scoreboard (number of top scores to keep).
const BOARD_SIZE: usize = 10;

/// Object that represent a score.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Points earned during the game.
    pub points: u32,

    /// How long did it take for completing the game.
    pub time: Duration,

    /// Number of mistakes during the game.
    pub errors: usize,

    /// Completion timestamp, which is used to display the date and time in the scoreboard.
    pub when: SystemTime,
}

impl Score {
    /// Whether this score ranks before the given points and time.
    ///
    /// More points is better. For the same points, a shorter time is better.
    fn beats(&self, points: u32, time: Duration) -> bool {
        self.points > points || (self.points == points && self.time <= time)
    }

    /// Return the completion date in the local time zone, such as `2025-03-14 15:09`.
    pub fn when_local(&self) -> String {
        let when: DateTime<Local> = self.when.into();
        when.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Sorted list of the top scores for a difficulty level.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct ScoreBoard {
    /// Sorted list of the top scores.
    /// The number of scores in this list is controlled by the [`BOARD_SIZE`] constant.
    top: Vec<Score>,
}

impl ScoreBoard {
    /// Add a score to the scoreboard and return the position in the board, or None if the
    /// score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score).
    fn add_score(&mut self, score: Score) -> Option<usize> {
        let position: usize = self
            .top
            .iter()
            .take_while(|s| s.beats(score.points, score.time))
            .count();
        if position >= BOARD_SIZE {
            return None;
        }
        self.top.insert(position, score);
        self.top.truncate(BOARD_SIZE);
        Some(position + 1)
    }
}

/// List of the scoreboards for the difficulty levels.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HighScores {
    /// Map of the [`ScoreBoard`] scoreboards indexed by the difficulty level.
    board: HashMap<Difficulty, ScoreBoard>,
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the score to the scoreboard of the difficulty level and return the position in the
    /// scoreboard, or None if the score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score).
    pub fn add_score(
        &mut self,
        difficulty: Difficulty,
        points: u32,
        time: Duration,
        errors: usize,
    ) -> Option<usize> {
        self.board.entry(difficulty).or_default().add_score(Score {
            points,
            time,
            errors,
            when: SystemTime::now(),
        })
    }

    /// Return the list of [`Score`] for the difficulty level.
    ///
    /// Return None when the scoreboard is empty.
    pub fn get_score(&self, difficulty: Difficulty) -> Option<&Vec<Score>> {
        self.board.get(&difficulty).map(|b| &b.top)
    }
}
