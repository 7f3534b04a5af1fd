//! Error types for board construction, stepping and persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the Game of Life core.
#[derive(Error, Debug)]
pub enum LifeError {
    /// A cell query fell outside the grid
    #[error("Coordinates ({row}, {col}) out of bounds for {height}x{width} board")]
    OutOfBounds {
        row: isize,
        col: isize,
        height: usize,
        width: usize,
    },

    /// Negative generation count or malformed dimensions
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The board file could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored data does not describe a well-formed board
    #[error("Format error: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    #[must_use]
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    #[must_use]
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Self::Format(msg.into())
    }

    #[must_use]
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
