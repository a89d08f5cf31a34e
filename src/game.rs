/*
game.rs

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

//! Manage the status of a game in progress.

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::generator::GeneratorError;
use crate::generator::equation::{Evaluation, GeneratedEquation, Generator};
use crate::generator::patterns::EquationPattern;
use crate::generator::steps::{self, Difficulty, Step};
use crate::input_errors::InputErrors;
use crate::saver::game::instant;
use crate::tile_selection::TileSelection;

/// Manage the status of the game in progress.
///
/// The current equation and the tile selection are not saved. When a saved game is restored,
/// [`Game::restore`] generates a new equation for the current step.
#[derive(Serialize, Deserialize, Debug)]
pub struct Game {
    /// Difficulty level.
    pub difficulty: Difficulty,

    /// Steps for the difficulty level.
    #[serde(skip)]
    steps: Vec<Step>,

    /// Index of the current step in [`Game::steps`].
    current_step: usize,

    /// Equation for the current step.
    #[serde(skip)]
    equation: Option<GeneratedEquation>,

    /// Tiles that the player selected for the current equation.
    #[serde(skip)]
    pub selection: TileSelection,

    /// Points earned so far.
    pub score: u32,

    /// Whether the player skipped a step. In this case the game is not added to the score board.
    pub user_has_skipped: bool,

    /// Whether the player paused the game.
    pub paused: bool,

    /// Whether the game has started.
    pub started: bool,

    /// Whether all the steps are solved.
    pub finished: bool,

    /// Time when the game started. Used to compute game duration.
    #[serde(with = "instant")]
    start_time: Instant,

    /// The elapsed time when the player paused the game, or when the game ended.
    pause_duration: Option<Duration>,

    /// Manage input errors and the mistake counter.
    input_errors: InputErrors,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a [`Game`] object.
    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::default(),
            steps: Vec::new(),
            current_step: 0,
            equation: None,
            selection: TileSelection::new(),
            score: 0,
            user_has_skipped: false,
            paused: false,
            started: false,
            finished: false,
            start_time: Instant::now(),
            pause_duration: None,
            input_errors: InputErrors::new(),
        }
    }

    /// Clear all resources.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.current_step = 0;
        self.equation = None;
        self.selection.clear();
        self.score = 0;
        self.user_has_skipped = false;
        self.paused = false;
        self.started = false;
        self.finished = false;
        self.pause_duration = None;
        self.input_errors.clear();
    }

    /// Start a new game at the given difficulty level.
    ///
    /// # Errors
    ///
    /// The method returns an error if the equation for the first step cannot be generated.
    pub fn start(
        &mut self,
        difficulty: Difficulty,
        generator: &mut Generator,
    ) -> Result<(), GeneratorError> {
        self.clear();
        self.difficulty = difficulty;
        self.steps = steps::steps_for(difficulty);
        self.started = true;
        self.start_time = Instant::now();
        debug!("New {difficulty} game with {} steps", self.steps.len());
        self.regenerate(generator)
    }

    /// Rebuild the step list and the current equation after a saved game is loaded.
    ///
    /// # Errors
    ///
    /// The method returns an error if the equation cannot be generated.
    pub fn restore(&mut self, generator: &mut Generator) -> Result<(), GeneratorError> {
        self.steps = steps::steps_for(self.difficulty);
        if self.current_step >= self.steps.len() {
            self.finished = true;
        }
        debug!(
            "Restoring {} game at step {}/{}",
            self.difficulty,
            self.current_step_number(),
            self.steps.len()
        );
        self.regenerate(generator)
    }

    /// Generate a new equation for the current step and reset the selection.
    ///
    /// # Errors
    ///
    /// The method returns an error if the equation cannot be generated.
    pub fn regenerate(&mut self, generator: &mut Generator) -> Result<(), GeneratorError> {
        self.selection.clear();
        self.input_errors.clear_tiles();
        self.equation = match self.steps.get(self.current_step) {
            Some(step) if !self.finished => Some(generator.generate(&step.pattern)?),
            _ => None,
        };
        Ok(())
    }

    /// Return the current equation, or None if the game is not running.
    pub fn equation(&self) -> Option<&GeneratedEquation> {
        self.equation.as_ref()
    }

    /// Return the pattern of the current step.
    pub fn current_pattern(&self) -> Option<&EquationPattern> {
        self.steps.get(self.current_step).map(|s| &s.pattern)
    }

    /// Return the current step number, starting at 1.
    pub fn current_step_number(&self) -> usize {
        self.current_step + 1
    }

    /// Return the number of steps in the game.
    pub fn steps_len(&self) -> usize {
        self.steps.len()
    }

    /// Return the status of the current selection.
    pub fn evaluation(&self) -> Option<Evaluation> {
        self.equation.as_ref().map(|e| self.selection.evaluate(e))
    }

    /// Whether the current selection solves the current equation.
    pub fn is_step_solved(&self) -> bool {
        self.evaluation().is_some_and(|e| e.solved)
    }

    /// Whether the player can select tiles.
    fn accepts_input(&self) -> bool {
        self.started && !self.paused && !self.finished
    }

    /// Update the mistake counter after the tile changed.
    fn track_tile(&mut self, tile_index: usize, selected: bool) -> Option<Evaluation> {
        let evaluation: Evaluation = self.evaluation()?;
        if selected {
            self.input_errors.add_tile(
                tile_index,
                evaluation.overflow || evaluation.too_many_tiles,
            );
        } else {
            self.input_errors.clear_tile(tile_index);
        }
        Some(evaluation)
    }

    /// Select or deselect the tile and return the status of the selection.
    ///
    /// Return None if the game does not accept input or if the tile does not exist.
    pub fn toggle_tile(&mut self, tile_index: usize) -> Option<Evaluation> {
        if !self.accepts_input() {
            return None;
        }
        self.equation.as_ref()?.tile(tile_index)?;
        let selected: bool = self.selection.toggle(tile_index);
        self.track_tile(tile_index, selected)
    }

    /// Undo the last tile selection change.
    pub fn undo(&mut self) -> Option<Evaluation> {
        if !self.accepts_input() {
            return None;
        }
        let (tile_index, selected) = self.selection.undo()?;
        self.track_tile(tile_index, selected)
    }

    /// Redo the last undone tile selection change.
    pub fn redo(&mut self) -> Option<Evaluation> {
        if !self.accepts_input() {
            return None;
        }
        let (tile_index, selected) = self.selection.redo()?;
        self.track_tile(tile_index, selected)
    }

    /// Points for solving a step with the given pattern.
    pub fn step_points(&self, pattern: &EquationPattern) -> u32 {
        pattern.number_of_correct_tiles as u32 * self.difficulty.multiplier()
    }

    /// If the current step is solved, award the points and move to the next step.
    ///
    /// Return the points earned, or None if the step is not solved.
    ///
    /// # Errors
    ///
    /// The method returns an error if the equation for the next step cannot be generated.
    pub fn advance(&mut self, generator: &mut Generator) -> Result<Option<u32>, GeneratorError> {
        if !self.accepts_input() || !self.is_step_solved() {
            return Ok(None);
        }
        let points: u32 = match self.current_pattern() {
            Some(p) => self.step_points(p),
            None => 0,
        };
        self.score += points;
        self.current_step += 1;
        debug!(
            "Step solved: +{points} points, score = {}, next step = {}",
            self.score,
            self.current_step_number()
        );

        if self.current_step >= self.steps.len() {
            self.finished = true;
            self.pause_duration = Some(self.start_time.elapsed());
            debug!("Game finished in {:?}", self.get_duration());
        }
        self.regenerate(generator)?;
        Ok(Some(points))
    }

    /// Replace the current equation by a new one, without points.
    ///
    /// # Errors
    ///
    /// The method returns an error if the new equation cannot be generated.
    pub fn skip_step(&mut self, generator: &mut Generator) -> Result<(), GeneratorError> {
        if !self.accepts_input() {
            return Ok(());
        }
        self.user_has_skipped = true;
        debug!("Step {} skipped", self.current_step_number());
        self.regenerate(generator)
    }

    /// Return the number of mistakes so far.
    pub fn get_errors(&self) -> usize {
        self.input_errors.get_errors()
    }

    /// Pause the game.
    pub fn pause(&mut self) {
        if self.paused || self.finished {
            return;
        }
        // Store the played time so far, so that the pause time can be deduced when the
        // player resumes the game.
        self.pause_duration = Some(self.start_time.elapsed());
        self.paused = true;
    }

    /// Resume the game.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        // Refresh the game elapsed time by removing the pause time.
        if let Some(d) = self.pause_duration {
            self.start_time += self.start_time.elapsed() - d;
            self.pause_duration = None;
        }
        self.paused = false;
    }

    /// Return the game duration. The duration does not grow while paused or once finished.
    pub fn get_duration(&self) -> Duration {
        match self.pause_duration {
            Some(d) => d,
            None => self.start_time.elapsed(),
        }
    }

    /// Return the game duration in hours, minutes, and seconds
    pub fn get_duration_hms(&self) -> (u64, u64, u64) {
        let duration: u64 = self.get_duration().as_secs();
        (
            duration / 3600,
            (duration % 3600) / 60,
            (duration % 3600) % 60,
        )
    }
}
