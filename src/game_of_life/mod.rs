//! Game of Life core functionality

pub mod board;
pub mod rules;
pub mod io;

pub use board::Board;
pub use rules::{Behaviour, Engine};
pub use io::{load_board, save_board, create_example_boards, default_output_path};
