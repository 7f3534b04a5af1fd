//! Conway's Game of Life
//!
//! This library provides an immutable board snapshot, a pure generation
//! stepping engine, and text/JSON persistence for board files.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::{EdgePolicy, Settings};
pub use error::{LifeError, Result};
pub use game_of_life::{Board, Engine};

use config::BoardFormat;
use std::path::Path;

/// Load a board, advance it `generations` steps and save the result.
///
/// The input format follows the input file extension; the output is
/// written in `settings.output.format`. `observer` sees every new generation.
pub fn run_generations<P, Q, F>(
    input: P,
    output: Q,
    generations: i64,
    settings: &Settings,
    observer: F,
) -> Result<Board>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(usize, &Board),
{
    let input = input.as_ref();
    let board = game_of_life::load_board(
        input,
        BoardFormat::from_path(input),
        settings.simulation.edge_policy,
    )?;
    let result = Engine::advance_with(&board, generations, observer)?;
    game_of_life::save_board(&result, output, settings.output.format)?;
    Ok(result)
}
