/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, Sumtiles plays a game in the terminal.
//! The other options are intended for developers creating patterns.
//!
//! # Examples
//!
//! List the available patterns:
//!
//! ```text
//! $ sumtiles --ls
//! PATTERN_1  a + b          [7, 9] [11, 18]                  3/6 tiles
//! PATTERN_2  a - b          [22, 29] [6, 8]                  3/6 tiles
//! PATTERN_3  a + b - c      [15, 21] [6, 9] [3, 5]           3/6 tiles
//! PATTERN_X  a + b + c - d  [7, 9] [6, 9] [20, 25] [11, 15]  4/8 tiles
//! ```
//!
//! Generate three equations for the third pattern:
//!
//! ```text
//! $ sumtiles -p 3 -c 3
//! 17 + 8 - 4 = 21   tiles: 7* 9* 5* 6 3 8
//! 20 + 6 - 5 = 21   tiles: 4* 9* 8* 3 9 5
//! 15 + 9 - 3 = 21   tiles: 8* 4* 9* 7 7 6
//! ```

use clap::{Parser, ValueEnum};
use log::debug;
use std::env;
use std::error::Error;
use std::path::PathBuf;

use crate::config::{self, COPYRIGHT_NOTICE};
use crate::generator::GeneratorError;
use crate::generator::equation::{GeneratedEquation, Generator};
use crate::generator::patterns::{self, EquationPattern, PatternName};
use crate::generator::steps::Difficulty;
use crate::highscores::HighScores;
use crate::saver::highscores::SaverHighScores;
use crate::terminal::PlayOptions;

/// Play Sumtiles in the terminal, or generate equations for pattern authors.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the patterns
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Name of the pattern to generate equations for
    #[arg(value_enum, short, long, group = "generate")]
    pattern: Option<PatternName>,

    /// Number of equations to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Print the generated equations in JSON format
    #[arg(long, default_value_t = false, requires = "generate")]
    json: bool,

    /// Verify that all the patterns can always be split into tiles
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Print the high scores
    #[arg(long, default_value_t = false)]
    scores: bool,

    /// Delete the high scores of all the difficulty levels
    #[arg(long, default_value_t = false, conflicts_with = "scores")]
    reset_scores: bool,

    /// Difficulty level for the game or the high scores: easy, medium, hard, or 1, 2, 3
    #[arg(short = 'f', long, default_value = "easy", value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// Seed for the random source, to reproduce the same equations
    #[arg(long)]
    seed: Option<u64>,

    /// Start a new game even if a saved game exists
    #[arg(long, default_value_t = false)]
    new: bool,

    /// Directory for the high scores and the saved game
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// What the program must do after parsing the command line.
#[derive(Debug)]
pub enum CliAction {
    /// The command is done. Exit with the given status.
    Exit(u8),

    /// Play a game in the terminal.
    Play(PlayOptions),
}

/// Parse and process command-line options.
pub fn parse() -> CliAction {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();
    debug!("{args:?}");

    let ret: Result<(), Box<dyn Error>> = if args.ls {
        list_patterns();
        Ok(())
    } else if args.check {
        return CliAction::Exit(check_patterns());
    } else if let Some(name) = args.pattern {
        print_equations(name, args.count, args.seed, args.json)
    } else if args.scores {
        print_scores(args.data_dir.clone(), args.difficulty)
    } else if args.reset_scores {
        reset_scores(args.data_dir.clone());
        Ok(())
    } else {
        return CliAction::Play(PlayOptions {
            difficulty: args.difficulty,
            seed: args.seed,
            data_dir: args.data_dir,
            new_game: args.new,
        });
    };

    match ret {
        Ok(()) => CliAction::Exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            CliAction::Exit(1)
        }
    }
}

/// Parse a difficulty name or level.
///
/// Levels other than 1, 2, and 3 give the easy level.
fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    match s.trim().parse::<i32>() {
        Ok(level) => Ok(Difficulty::from_level(level)),
        Err(_) => <Difficulty as ValueEnum>::from_str(s.trim(), true),
    }
}

/// Return a line that describes the pattern.
fn describe_pattern(pattern: &EquationPattern) -> String {
    let ranges: Vec<String> = pattern
        .ranges()
        .iter()
        .map(|(min, max)| format!("[{min}, {max}]"))
        .collect();
    format!(
        "{:<9}  {:<13}  {:<31}  {}/{} tiles",
        pattern.name.to_string(),
        pattern.form(),
        ranges.join(" "),
        pattern.number_of_correct_tiles,
        pattern.number_of_tiles
    )
}

/// Print the built-in patterns.
fn list_patterns() {
    let mut names: Vec<PatternName> = patterns::pattern_map().into_keys().collect();
    names.sort_unstable();
    for name in names {
        println!("{}", describe_pattern(&patterns::get(name)));
    }
}

/// Verify the built-in patterns and return the exit status.
fn check_patterns() -> u8 {
    let map = patterns::pattern_map();
    let errors: Vec<GeneratorError> = patterns::validate_pattern_table(map.values());
    if errors.is_empty() {
        println!("{} patterns OK", map.len());
        return 0;
    }
    for e in &errors {
        eprintln!("Error: {e}");
    }
    1
}

/// Return the equation and its tiles on one line. Correct tiles are marked with a star.
fn format_equation(equation: &GeneratedEquation) -> String {
    let tiles: Vec<String> = equation
        .tiles
        .iter()
        .map(|t| {
            if t.is_correct {
                format!("{}*", t.value)
            } else {
                t.value.to_string()
            }
        })
        .collect();
    format!(
        "{} = {}   tiles: {}",
        equation.expression,
        equation.result,
        tiles.join(" ")
    )
}

/// Return an iterator over `count` new equations for the pattern.
///
/// The equations are generated on demand.
fn generate_equations(
    name: PatternName,
    count: usize,
    seed: Option<u64>,
) -> impl Iterator<Item = Result<GeneratedEquation, GeneratorError>> {
    let pattern: EquationPattern = patterns::get(name);
    let mut generator: Generator = match seed {
        Some(s) => Generator::with_seed(s),
        None => Generator::new(),
    };
    (0..count).map(move |_| generator.generate(&pattern))
}

/// Generate and print equations for the pattern.
fn print_equations(
    name: PatternName,
    count: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let equations = generate_equations(name, count, seed);

    if json {
        // Stream the JSON array, one equation at a time
        println!("[");
        let mut first: bool = true;
        for equation in equations {
            let text: String = serde_json::to_string_pretty(&equation?)?;
            if !first {
                println!(",");
            }
            print!("{text}");
            first = false;
        }
        println!("\n]");
    } else {
        for equation in equations {
            println!("{}", format_equation(&equation?));
        }
    }
    Ok(())
}

/// Return the scoreboard for the difficulty level as text.
pub fn format_scores(highscores: &HighScores, difficulty: Difficulty) -> String {
    let mut out: String = format!("High scores ({difficulty})\n");
    match highscores.get_score(difficulty) {
        Some(top) if !top.is_empty() => {
            for (i, score) in top.iter().enumerate() {
                let secs: u64 = score.time.as_secs();
                out.push_str(&format!(
                    "{:>2}. {:>4} points  {:02}:{:02}:{:02}  {} mistakes  {}\n",
                    i + 1,
                    score.points,
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60,
                    score.errors,
                    score.when_local()
                ));
            }
        }
        _ => out.push_str("No scores yet\n"),
    }
    out
}

/// Delete the high scores.
fn reset_scores(data_dir: Option<PathBuf>) {
    SaverHighScores::new(config::data_dir(data_dir)).delete_save();
    println!("High scores deleted");
}

/// Print the scoreboard for the difficulty level.
fn print_scores(data_dir: Option<PathBuf>, difficulty: Difficulty) -> Result<(), Box<dyn Error>> {
    let saver = SaverHighScores::new(config::data_dir(data_dir));
    let highscores: HighScores = saver.get_highscores()?.unwrap_or_else(HighScores::new);
    print!("{}", format_scores(&highscores, difficulty));
    Ok(())
}
