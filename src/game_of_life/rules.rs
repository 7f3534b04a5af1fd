//! Game of Life transition rule and generation stepping

use super::Board;
use crate::error::{LifeError, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Next state indexed by `[current state][live neighbour count]`.
/// Row 0 is a dead cell (birth on 3), row 1 a live cell (survival on 2 or 3).
const TRANSITIONS: [[bool; 9]; 2] = [
    [false, false, false, true, false, false, false, false, false],
    [false, false, true, true, false, false, false, false, false],
];

/// Long-run behaviour of a board within a bounded horizon.
///
/// `from` is the first generation of the settled state, so a pattern that
/// needs a few steps to reach a still life reports `StillLife { from: k }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    /// Every cell is dead at the given generation
    Extinct { generation: usize },
    /// Generation `from` equals its own successor
    StillLife { from: usize },
    /// Generation `from` repeats after `period` generations
    Oscillator { period: usize, from: usize },
    /// No repetition or extinction within the horizon
    Unsettled,
}

impl fmt::Display for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behaviour::Extinct { generation: 0 } => write!(f, "Empty"),
            Behaviour::Extinct { generation } => write!(f, "Extinct after {} generation(s)", generation),
            Behaviour::StillLife { from: 0 } => write!(f, "Still Life"),
            Behaviour::StillLife { from } => write!(f, "Still Life from generation {}", from),
            Behaviour::Oscillator { period, from: 0 } => write!(f, "Oscillator (period {})", period),
            Behaviour::Oscillator { period, from } => {
                write!(f, "Oscillator (period {}) from generation {}", period, from)
            }
            Behaviour::Unsettled => write!(f, "Unsettled"),
        }
    }
}

/// Game of Life rules engine
pub struct Engine;

impl Engine {
    /// Next state of a single cell
    #[inline]
    pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
        TRANSITIONS[alive as usize]
            .get(live_neighbors as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Compute the next generation as a new board
    pub fn step(current: &Board) -> Board {
        let width = current.width();
        let cells = current.cells();

        // Each output cell reads only the input snapshot, so rows can run in parallel
        let next_cells: Vec<bool> = (0..current.height())
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..width).map(move |col| {
                    let neighbors = current.live_neighbors_unchecked(row, col);
                    Self::next_state(cells[row * width + col], neighbors)
                })
            })
            .collect();

        current.with_cells(next_cells)
    }

    /// Advance the board a number of generations
    pub fn advance(board: &Board, generations: i64) -> Result<Board> {
        Self::advance_with(board, generations, |_, _| {})
    }

    /// Advance the board, calling `observer` with each new generation
    pub fn advance_with<F>(board: &Board, generations: i64, mut observer: F) -> Result<Board>
    where
        F: FnMut(usize, &Board),
    {
        let generations = check_generations(generations)?;
        let mut current = board.clone();

        for generation in 1..=generations {
            current = Self::step(&current);
            tracing::debug!(
                generation,
                living = current.living_count(),
                "Advanced board"
            );
            observer(generation, &current);
        }

        Ok(current)
    }

    /// Every generation from the input (index 0) through `generations`
    pub fn history(board: &Board, generations: i64) -> Result<Vec<Board>> {
        let mut path = vec![board.clone()];
        Self::advance_with(board, generations, |_, next| path.push(next.clone()))?;
        Ok(path)
    }

    /// Classify a board by stepping it at most `horizon` generations
    pub fn classify(board: &Board, horizon: usize) -> Behaviour {
        if board.is_empty() {
            return Behaviour::Extinct { generation: 0 };
        }

        let mut seen = HashMap::from([(board.clone(), 0usize)]);
        let mut current = board.clone();
        for generation in 1..=horizon {
            current = Self::step(&current);
            if current.is_empty() {
                return Behaviour::Extinct { generation };
            }
            if let Some(&from) = seen.get(&current) {
                return match generation - from {
                    1 => Behaviour::StillLife { from },
                    period => Behaviour::Oscillator { period, from },
                };
            }
            seen.insert(current.clone(), generation);
        }

        Behaviour::Unsettled
    }
}

fn check_generations(generations: i64) -> Result<usize> {
    usize::try_from(generations).map_err(|_| {
        LifeError::invalid_argument(format!(
            "Generation count must be non-negative, got {}",
            generations
        ))
    })
}
