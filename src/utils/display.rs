//! Display and output formatting utilities

use crate::game_of_life::{Behaviour, Board};

/// Format boards for console output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format a board in compact form
    pub fn format_compact(board: &Board) -> String {
        board.to_string()
    }

    /// Format a board with coordinates
    pub fn format_with_coords(board: &Board) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..board.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in board.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One generation as printed by `run --verbose`
    pub fn format_generation(generation: usize, board: &Board) -> String {
        format!(
            "Generation {} (Living: {}):\n{}",
            generation,
            board.living_count(),
            Self::format_compact(board)
        )
    }

    /// Summary statistics for a board
    pub fn format_statistics(board: &Board, behaviour: Behaviour) -> String {
        let mut output = String::new();
        output.push_str("Board Statistics:\n");
        output.push_str(&format!("  Size: {}x{}\n", board.width(), board.height()));
        output.push_str(&format!("  Edge policy: {}\n", board.edge_policy()));
        output.push_str(&format!("  Living cells: {}\n", board.living_count()));
        output.push_str(&format!("  Density: {:.1}%\n", board.density() * 100.0));
        output.push_str(&format!("  Behaviour: {}\n", behaviour));
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
