/*
terminal.rs

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

//! Play a game in the terminal.
//!
//! The board is printed after each command. The player types the position of a tile to select
//! or deselect it. When the selected tiles solve the equation, the points are awarded and the
//! next step starts.
//!
//! When the player quits, the game is saved and is restored the next time Sumtiles starts.

use log::debug;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::cli_options::format_scores;
use crate::config;
use crate::game::Game;
use crate::generator::equation::{Evaluation, Generator, GeneratorOptions};
use crate::generator::steps::Difficulty;
use crate::highscores::HighScores;
use crate::saver::game::SaverGame;
use crate::saver::highscores::SaverHighScores;

const HELP: &str = "Commands:
  <number>  select or deselect the tile at that position
  u         undo
  r         redo
  s         skip the equation (the game does not enter the high scores)
  p         pause or resume
  q         save and quit
  ?         this help";

/// Settings for a game in the terminal.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Difficulty level for a new game.
    pub difficulty: Difficulty,

    /// Seed for the random source.
    pub seed: Option<u64>,

    /// Directory for the high scores and the saved game.
    pub data_dir: Option<PathBuf>,

    /// Whether to ignore the saved game.
    pub new_game: bool,
}

/// Player command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Select or deselect the tile at the position, starting at 1.
    Toggle(usize),
    Undo,
    Redo,
    Skip,
    Pause,
    Quit,
    Help,
    Empty,
    Unknown(String),
}

/// How the game loop ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// All the steps are solved.
    Finished,

    /// The player quit or the input ended.
    Quit,
}

/// Parse a line typed by the player.
pub fn parse_command(line: &str) -> Command {
    let line: &str = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if let Ok(position) = line.parse::<usize>() {
        return Command::Toggle(position);
    }
    match line.to_lowercase().as_str() {
        "u" | "undo" => Command::Undo,
        "r" | "redo" => Command::Redo,
        "s" | "skip" => Command::Skip,
        "p" | "pause" | "resume" => Command::Pause,
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "h" | "help" => Command::Help,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Return the board as text.
pub fn render(game: &Game) -> String {
    let (h, m, s) = game.get_duration_hms();
    let mut out: String = format!(
        "Step {}/{}  Score {}  Mistakes {}  Time {h:02}:{m:02}:{s:02}\n",
        game.current_step_number().min(game.steps_len()),
        game.steps_len(),
        game.score,
        game.get_errors()
    );
    if game.paused {
        out.push_str("Paused. Type p to resume.\n");
        return out;
    }
    let (Some(equation), Some(evaluation)) = (game.equation(), game.evaluation()) else {
        return out;
    };

    out.push_str(&format!(
        "{} = ?   (select {} tiles)\n",
        equation.expression, equation.number_of_correct_tiles
    ));
    let tiles: Vec<String> = equation
        .tiles
        .iter()
        .enumerate()
        .map(|(pos, t)| {
            if game.selection.contains(t.index) {
                format!("{}:[{}]", pos + 1, t.value)
            } else {
                format!("{}: {} ", pos + 1, t.value)
            }
        })
        .collect();
    out.push_str(&tiles.join("  "));
    out.push('\n');
    out.push_str(&status_line(&evaluation));
    out
}

/// Return the "total to go" line with the warnings.
fn status_line(evaluation: &Evaluation) -> String {
    let mut line: String = format!("Total to go: {}", evaluation.remaining);
    if evaluation.overflow {
        line.push_str("  Overflow!");
    }
    if evaluation.too_many_tiles {
        line.push_str("  Too many tiles!");
    }
    line.push('\n');
    line
}

/// Convert a tile position on the board, starting at 1, to the tile index.
fn tile_index(game: &Game, position: usize) -> Option<usize> {
    let equation = game.equation()?;
    equation.tiles.get(position.checked_sub(1)?).map(|t| t.index)
}

/// Award the points if the step is solved.
fn check_step<W: Write>(
    game: &mut Game,
    generator: &mut Generator,
    output: &mut W,
) -> Result<(), Box<dyn Error>> {
    if let Some(points) = game.advance(generator)? {
        writeln!(output, "Solved! +{points} points")?;
    }
    Ok(())
}

/// Read commands from the input and play until the game is finished or the player quits.
///
/// # Errors
///
/// The function returns an error on I/O errors, or if an equation cannot be generated.
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    generator: &mut Generator,
    input: R,
    output: &mut W,
) -> Result<Outcome, Box<dyn Error>> {
    write!(output, "{}> ", render(game))?;
    output.flush()?;

    for line in input.lines() {
        let line: String = line?;
        let command: Command = parse_command(&line);
        debug!("Command: {command:?}");

        if game.paused && !matches!(command, Command::Pause | Command::Quit | Command::Help) {
            writeln!(output, "The game is paused. Type p to resume.")?;
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }

        match command {
            Command::Toggle(position) => match tile_index(game, position) {
                Some(index) => {
                    game.toggle_tile(index);
                    check_step(game, generator, output)?;
                }
                None => writeln!(output, "No tile at position {position}")?,
            },
            Command::Undo => {
                if game.undo().is_none() {
                    writeln!(output, "Nothing to undo")?;
                }
                check_step(game, generator, output)?;
            }
            Command::Redo => {
                if game.redo().is_none() {
                    writeln!(output, "Nothing to redo")?;
                }
                check_step(game, generator, output)?;
            }
            Command::Skip => {
                game.skip_step(generator)?;
                writeln!(output, "New equation. This game does not enter the high scores.")?;
            }
            Command::Pause => {
                if game.paused {
                    game.resume();
                } else {
                    game.pause();
                }
            }
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Empty => (),
            Command::Unknown(s) => writeln!(output, "Unknown command {s:?}. Type ? for help.")?,
        }

        if game.finished {
            let (h, m, s) = game.get_duration_hms();
            writeln!(
                output,
                "Well done! {} points in {h:02}:{m:02}:{s:02} with {} mistakes.",
                game.score,
                game.get_errors()
            )?;
            return Ok(Outcome::Finished);
        }
        write!(output, "{}> ", render(game))?;
        output.flush()?;
    }
    Ok(Outcome::Quit)
}

/// Record the score of a finished game and return the scoreboard as text.
fn record_score(saver: &SaverHighScores, game: &Game) -> Result<String, Box<dyn Error>> {
    let mut highscores: HighScores = saver.get_highscores()?.unwrap_or_else(HighScores::new);
    if game.user_has_skipped {
        debug!("Equations skipped: the score is not recorded");
    } else if let Some(position) = highscores.add_score(
        game.difficulty,
        game.score,
        game.get_duration(),
        game.get_errors(),
    ) {
        debug!("New high score at position {position}");
        saver.save_highscores(&highscores)?;
    }
    Ok(format_scores(&highscores, game.difficulty))
}

/// Return the saved game if one exists and is not finished.
fn saved_game(saver: &SaverGame, generator: &mut Generator) -> Result<Option<Game>, Box<dyn Error>> {
    let Some(mut game) = saver.get_game()? else {
        return Ok(None);
    };
    game.restore(generator)?;
    if !game.started || game.finished {
        saver.delete_save();
        return Ok(None);
    }
    game.resume();
    Ok(Some(game))
}

/// Play a game in the terminal.
///
/// # Errors
///
/// The function returns an error if the data directory cannot be used, on I/O errors, or if an
/// equation cannot be generated.
pub fn play(options: &PlayOptions) -> Result<(), Box<dyn Error>> {
    let data_dir: PathBuf = config::ensure_data_dir(options.data_dir.clone())?;
    let saver_game = SaverGame::new(data_dir.clone());
    let saver_highscores = SaverHighScores::new(data_dir);

    let generator_options = GeneratorOptions {
        shuffle: true,
        ..GeneratorOptions::default()
    };
    let mut generator: Generator = match options.seed {
        Some(s) => Generator::with_seed(s),
        None => Generator::new(),
    }
    .with_options(generator_options);

    let restored: Option<Game> = if options.new_game {
        None
    } else {
        saved_game(&saver_game, &mut generator)?
    };
    let mut game: Game = match restored {
        Some(g) => {
            println!("Resuming the saved {} game. Use --new to start a new one.", g.difficulty);
            g
        }
        None => {
            let mut g = Game::new();
            g.start(options.difficulty, &mut generator)?;
            g
        }
    };
    println!("Type ? for help.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match run(&mut game, &mut generator, stdin.lock(), &mut stdout)? {
        Outcome::Finished => {
            saver_game.delete_save();
            print!("{}", record_score(&saver_highscores, &game)?);
        }
        Outcome::Quit => {
            game.pause();
            saver_game.save_game(&game)?;
            println!("\nGame saved.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(seed: u64, difficulty: Difficulty) -> (Game, Generator) {
        let mut generator = Generator::with_seed(seed).with_options(GeneratorOptions {
            shuffle: true,
            ..GeneratorOptions::default()
        });
        let mut game = Game::new();
        game.start(difficulty, &mut generator).unwrap();
        (game, generator)
    }

    /// Return the commands that solve the current equation.
    fn answer(game: &Game) -> String {
        let equation = game.equation().unwrap();
        let positions: Vec<String> = equation
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_correct)
            .map(|(pos, _)| (pos + 1).to_string())
            .collect();
        positions.join("\n") + "\n"
    }

    fn run_script(game: &mut Game, generator: &mut Generator, script: &str) -> (Outcome, String) {
        let mut output: Vec<u8> = Vec::new();
        let outcome = run(game, generator, script.as_bytes(), &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(" 3 "), Command::Toggle(3));
        assert_eq!(parse_command("u"), Command::Undo);
        assert_eq!(parse_command("R"), Command::Redo);
        assert_eq!(parse_command("skip"), Command::Skip);
        assert_eq!(parse_command("p"), Command::Pause);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("-1"), Command::Unknown("-1".to_string()));
    }

    #[test]
    fn test_render() {
        let (mut game, _) = new_game(1, Difficulty::Easy);
        let text = render(&game);
        assert!(text.starts_with("Step 1/5  Score 0  Mistakes 0"));
        assert!(text.contains(&game.equation().unwrap().expression));
        assert!(text.contains("(select 3 tiles)"));
        let result = game.equation().unwrap().result;
        assert!(text.contains(&format!("Total to go: {result}")));

        game.pause();
        assert!(render(&game).contains("Paused"));
    }

    #[test]
    fn test_status_line() {
        let evaluation = Evaluation {
            selected_sum: 30,
            selected_count: 4,
            remaining: -2,
            solved: false,
            overflow: true,
            too_many_tiles: true,
        };
        assert_eq!(
            status_line(&evaluation),
            "Total to go: -2  Overflow!  Too many tiles!\n"
        );
    }

    #[test]
    fn test_solve_step() {
        let (mut game, mut generator) = new_game(2, Difficulty::Easy);
        let script = answer(&game);
        let (outcome, text) = run_script(&mut game, &mut generator, &script);
        assert_eq!(outcome, Outcome::Quit);
        assert!(text.contains("Solved! +3 points"));
        assert_eq!(game.current_step_number(), 2);
        assert_eq!(game.score, 3);
    }

    #[test]
    fn test_play_to_the_end() {
        let (mut game, mut generator) = new_game(3, Difficulty::Easy);
        let mut outcome = Outcome::Quit;
        while !game.finished {
            let script = answer(&game);
            outcome = run_script(&mut game, &mut generator, &script).0;
        }
        assert_eq!(outcome, Outcome::Finished);
        assert_eq!(game.score, 3 * 3 + 2 * 4);
    }

    #[test]
    fn test_commands() {
        let (mut game, mut generator) = new_game(4, Difficulty::Medium);
        let (outcome, text) = run_script(&mut game, &mut generator, "42\nu\nfoo\n?\n1\nu\nr\nq\n1\n");
        assert_eq!(outcome, Outcome::Quit);
        assert!(text.contains("No tile at position 42"));
        assert!(text.contains("Nothing to undo"));
        assert!(text.contains("Unknown command \"foo\""));
        assert!(text.contains("Commands:"));
        // The last line is not read after quitting
        assert_eq!(game.selection.len(), 1);
    }

    #[test]
    fn test_pause_blocks_input() {
        let (mut game, mut generator) = new_game(5, Difficulty::Easy);
        let (_, text) = run_script(&mut game, &mut generator, "p\n1\n");
        assert!(game.paused);
        assert!(game.selection.is_empty());
        assert!(text.contains("The game is paused"));
        run_script(&mut game, &mut generator, "p\n1\n");
        assert!(!game.paused);
        assert_eq!(game.selection.len(), 1);
    }

    #[test]
    fn test_skip() {
        let (mut game, mut generator) = new_game(6, Difficulty::Easy);
        run_script(&mut game, &mut generator, "1\ns\n");
        assert!(game.user_has_skipped);
        assert!(game.selection.is_empty());
    }

    #[test]
    fn test_record_score() {
        let tmp = tempfile::tempdir().unwrap();
        let saver = SaverHighScores::new(tmp.path().to_path_buf());

        let (mut game, mut generator) = new_game(7, Difficulty::Easy);
        while !game.finished {
            let script = answer(&game);
            run_script(&mut game, &mut generator, &script);
        }
        let text = record_score(&saver, &game).unwrap();
        assert!(text.contains(" 1.   17 points"));
        let highscores = saver.get_highscores().unwrap().unwrap();
        assert_eq!(highscores.get_score(Difficulty::Easy).unwrap().len(), 1);
    }

    #[test]
    fn test_skipped_game_is_not_recorded() {
        let tmp = tempfile::tempdir().unwrap();
        let saver = SaverHighScores::new(tmp.path().to_path_buf());

        let (mut game, mut generator) = new_game(8, Difficulty::Easy);
        run_script(&mut game, &mut generator, "s\n");
        while !game.finished {
            let script = answer(&game);
            run_script(&mut game, &mut generator, &script);
        }
        let text = record_score(&saver, &game).unwrap();
        assert!(text.contains("No scores yet"));
        assert!(saver.get_highscores().unwrap().is_none());
    }

    #[test]
    fn test_saved_game() {
        let tmp = tempfile::tempdir().unwrap();
        let saver = SaverGame::new(tmp.path().to_path_buf());
        let (mut game, mut generator) = new_game(9, Difficulty::Hard);
        assert!(saved_game(&saver, &mut generator).unwrap().is_none());

        let script = answer(&game);
        run_script(&mut game, &mut generator, &script);
        game.pause();
        saver.save_game(&game).unwrap();

        let restored = saved_game(&saver, &mut generator).unwrap().unwrap();
        assert!(!restored.paused);
        assert_eq!(restored.difficulty, Difficulty::Hard);
        assert_eq!(restored.current_step_number(), 2);
        assert_eq!(restored.score, 9);
    }
}
