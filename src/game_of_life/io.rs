//! File I/O operations for Game of Life boards
//!
//! Two encodings are supported. The text format is a header line
//! `# life <width>x<height> <edge>` followed by one line per row with `1`
//! for alive and `0` for dead cells. The edge field is `dead` or `toroidal`
//! and may be left out; a header without it, like a file with no header at
//! all, takes the caller's default edge policy. The JSON format stores the
//! same attributes as a versioned record.

use super::Board;
use crate::config::{BoardFormat, EdgePolicy};
use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const HEADER_PREFIX: &str = "# life";
const CURRENT_JSON_VERSION: u32 = 1;

/// Versioned JSON form of a board
#[derive(Debug, Serialize, Deserialize)]
struct BoardRecord {
    version: u32,
    width: usize,
    height: usize,
    edge_policy: EdgePolicy,
    cells: Vec<Vec<bool>>,
}

/// Load a board from a file.
///
/// `default_edge` applies only to text files whose header does not name an
/// edge policy, or that have no header.
pub fn load_board<P: AsRef<Path>>(
    path: P,
    format: BoardFormat,
    default_edge: EdgePolicy,
) -> Result<Board> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|source| LifeError::io(path, source))?;

    let board = match format {
        BoardFormat::Text => parse_board(&content, default_edge),
        BoardFormat::Json => board_from_json(&content),
    }
    .map_err(|e| match e {
        LifeError::Format(msg) => LifeError::format(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    tracing::info!(
        path = %path.display(),
        width = board.width(),
        height = board.height(),
        "Loaded board"
    );
    Ok(board)
}

/// Save a board to a file, creating parent directories as needed
pub fn save_board<P: AsRef<Path>>(board: &Board, path: P, format: BoardFormat) -> Result<()> {
    let path = path.as_ref();
    let content = match format {
        BoardFormat::Text => board_to_string(board),
        BoardFormat::Json => board_to_json(board)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|source| LifeError::io(parent, source))?;
    }

    std::fs::write(path, content)
        .map_err(|source| LifeError::io(path, source))?;

    tracing::info!(path = %path.display(), ?format, "Saved board");
    Ok(())
}

/// Parse a board from its text representation
pub fn parse_board(content: &str, default_edge: EdgePolicy) -> Result<Board> {
    let mut lines = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let header = match lines.peek() {
        Some(line) if line.starts_with('#') => {
            let header = parse_header(line, default_edge)?;
            lines.next();
            Some(header)
        }
        _ => None,
    };

    let mut rows = Vec::new();
    for (row_idx, line) in lines.enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(LifeError::format(format!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch, row_idx, col_idx
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LifeError::format("Board file is empty or contains no valid rows"));
    }

    let edge_policy = match header {
        Some(header) => {
            check_shape(&rows, header.width, header.height)?;
            header.edge_policy
        }
        None => {
            let width = rows[0].len();
            check_shape(&rows, width, rows.len())?;
            default_edge
        }
    };

    Board::from_rows(rows, edge_policy).map_err(into_format_error)
}

/// Convert a board to its text representation
pub fn board_to_string(board: &Board) -> String {
    let mut result = String::with_capacity(32 + board.height() * (board.width() + 1));

    result.push_str(&format!(
        "{} {}x{} {}\n",
        HEADER_PREFIX,
        board.width(),
        board.height(),
        board.edge_policy()
    ));
    for row in board.rows() {
        result.extend(row.iter().map(|&cell| if cell { '1' } else { '0' }));
        result.push('\n');
    }

    result
}

/// Convert a board to its JSON representation
pub fn board_to_json(board: &Board) -> Result<String> {
    let record = BoardRecord {
        version: CURRENT_JSON_VERSION,
        width: board.width(),
        height: board.height(),
        edge_policy: board.edge_policy(),
        cells: board.rows().map(<[bool]>::to_vec).collect(),
    };
    serde_json::to_string_pretty(&record)
        .map_err(|e| LifeError::format(format!("Failed to serialize board: {}", e)))
}

/// Parse a board from its JSON representation
pub fn board_from_json(json: &str) -> Result<Board> {
    let record: BoardRecord = serde_json::from_str(json)
        .map_err(|e| LifeError::format(format!("Invalid board JSON: {}", e)))?;

    if record.version != CURRENT_JSON_VERSION {
        return Err(LifeError::format(format!(
            "Unsupported board version {} (expected {})",
            record.version, CURRENT_JSON_VERSION
        )));
    }

    check_shape(&record.cells, record.width, record.height)?;
    Board::from_rows(record.cells, record.edge_policy).map_err(into_format_error)
}

/// Default output file name stamped with the current local time
pub fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "conway{}.txt",
        chrono::Local::now().format("%d%m%Y.%H-%M-%S")
    ))
}

/// Create example board files for testing
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .map_err(|source| LifeError::io(dir, source))?;

    let examples: [(&str, &[&str]); 5] = [
        ("glider", &["01000", "00100", "11100", "00000", "00000"]),
        ("blinker", &["000", "111", "000"]),
        ("block", &["0000", "0110", "0110", "0000"]),
        ("beacon", &["110000", "110000", "001100", "001100"]),
        ("boat", &["00000", "01100", "01010", "00100", "00000"]),
    ];

    for (name, rows) in examples {
        let board = parse_board(&rows.join("\n"), EdgePolicy::Dead)?;
        save_board(&board, dir.join(format!("{}.txt", name)), BoardFormat::Text)?;
    }

    Ok(())
}

struct Header {
    width: usize,
    height: usize,
    edge_policy: EdgePolicy,
}

fn parse_header(line: &str, default_edge: EdgePolicy) -> Result<Header> {
    let malformed = || {
        LifeError::format(format!(
            "Malformed header '{}', expected '{} <width>x<height> [dead|toroidal]'",
            line, HEADER_PREFIX
        ))
    };

    let rest = line.strip_prefix(HEADER_PREFIX).ok_or_else(malformed)?;
    let mut fields = rest.split_whitespace();
    let (width, height) = fields
        .next()
        .and_then(|dims| dims.split_once('x'))
        .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)))
        .ok_or_else(malformed)?;
    let edge_policy = match fields.next() {
        Some(name) => EdgePolicy::parse(name).ok_or_else(malformed)?,
        None => default_edge,
    };
    if fields.next().is_some() {
        return Err(malformed());
    }

    Ok(Header { width, height, edge_policy })
}

fn check_shape(rows: &[Vec<bool>], width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(LifeError::format(format!(
            "Board dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if rows.len() != height {
        return Err(LifeError::format(format!(
            "Expected {} rows, found {}",
            height,
            rows.len()
        )));
    }
    if let Some((row_idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(LifeError::format(format!(
            "Row {} has length {}, expected {} (all rows must have the same length)",
            row_idx,
            row.len(),
            width
        )));
    }
    Ok(())
}

fn into_format_error(err: LifeError) -> LifeError {
    match err {
        LifeError::InvalidArgument(msg) => LifeError::Format(msg),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn glider() -> Board {
        Board::from_live_cells(5, 5, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)], EdgePolicy::Dead)
            .unwrap()
    }

    #[test]
    fn test_parse_board_with_header() {
        let content = "# life 3x3 toroidal\n010\n101\n010\n";
        let board = parse_board(content, EdgePolicy::Dead).unwrap();

        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 3);
        assert_eq!(board.edge_policy(), EdgePolicy::Toroidal);
        assert_eq!(board.living_cells(), vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_parse_headerless_board_uses_default_edge() {
        let board = parse_board("0110\n\n1001\n", EdgePolicy::Toroidal).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 2);
        assert_eq!(board.edge_policy(), EdgePolicy::Toroidal);
    }

    #[test]
    fn test_header_without_edge_uses_default_edge() {
        let content = "# life 3x3\n010\n010\n010\n";

        let toroidal = parse_board(content, EdgePolicy::Toroidal).unwrap();
        assert_eq!(toroidal.edge_policy(), EdgePolicy::Toroidal);
        assert_eq!(toroidal.living_cells(), vec![(0, 1), (1, 1), (2, 1)]);

        let dead = parse_board(content, EdgePolicy::Dead).unwrap();
        assert_eq!(dead.edge_policy(), EdgePolicy::Dead);

        // An explicit edge field wins over the default
        let explicit = parse_board("# life 3x3 dead\n010\n010\n010\n", EdgePolicy::Toroidal).unwrap();
        assert_eq!(explicit.edge_policy(), EdgePolicy::Dead);
    }

    #[test]
    fn test_board_to_string() {
        let board = Board::from_live_cells(3, 2, &[(0, 1), (1, 0), (1, 2)], EdgePolicy::Dead).unwrap();
        assert_eq!(board_to_string(&board), "# life 3x2 dead\n010\n101\n");
    }

    #[test]
    fn test_text_round_trip() {
        let board = glider().with_edge_policy(EdgePolicy::Toroidal);
        let parsed = parse_board(&board_to_string(&board), EdgePolicy::Dead).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_invalid_text() {
        let cases = [
            "010\n1X1\n010\n",
            "010\n11\n010\n",
            "",
            "# life 3x2 dead\n010\n101\n111\n",
            "# life 4x2 dead\n010\n101\n",
            "# life 3by2 dead\n010\n101\n",
            "# life 2x2 sideways\n01\n10\n",
            "# life 2x2 wrap\n01\n10\n",
            "# life 2x2 dead extra\n01\n10\n",
            "# life 0x0 dead\n",
        ];
        for content in cases {
            assert!(
                matches!(parse_board(content, EdgePolicy::Dead), Err(LifeError::Format(_))),
                "expected format error for {:?}",
                content
            );
        }
    }

    #[test]
    fn test_json_round_trip() {
        let board = glider();
        let json = board_to_json(&board).unwrap();
        assert!(json.contains("\"edge_policy\": \"dead\""));
        assert_eq!(board_from_json(&json).unwrap(), board);
    }

    #[test]
    fn test_invalid_json() {
        let mismatched = r#"{"version":1,"width":3,"height":1,"edge_policy":"dead","cells":[[true,false]]}"#;
        let wrong_version = r#"{"version":9,"width":1,"height":1,"edge_policy":"dead","cells":[[true]]}"#;
        let too_many_rows = r#"{"version":1,"width":1,"height":1,"edge_policy":"dead","cells":[[true],[false]]}"#;

        for json in [mismatched, wrong_version, too_many_rows, "[1, 2, 3]", "not json"] {
            assert!(matches!(board_from_json(json), Err(LifeError::Format(_))));
        }
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let board = glider();

        for format in [BoardFormat::Text, BoardFormat::Json] {
            let file_path = temp_dir
                .path()
                .join("nested")
                .join(format!("board.{}", format.extension()));
            save_board(&board, &file_path, format).unwrap();

            let loaded = load_board(&file_path, format, EdgePolicy::Toroidal).unwrap();
            assert_eq!(loaded, board);
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = tempdir().unwrap();
        let result = load_board(temp_dir.path().join("absent.txt"), BoardFormat::Text, EdgePolicy::Dead);
        assert!(matches!(result, Err(LifeError::Io { .. })));
    }

    #[test]
    fn test_corrupt_file_is_format_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        std::fs::write(&path, "{\"version\": 1}").unwrap();

        let result = load_board(&path, BoardFormat::Json, EdgePolicy::Dead);
        match result {
            Err(LifeError::Format(msg)) => assert!(msg.contains("corrupt.json")),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_unwritable_destination_is_io_error() {
        let temp_dir = tempdir().unwrap();
        // A directory cannot be overwritten by a file
        let result = save_board(&glider(), temp_dir.path(), BoardFormat::Text);
        assert!(matches!(result, Err(LifeError::Io { .. })));
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path();
        let name = path.to_str().unwrap();
        assert!(name.starts_with("conway"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_create_example_boards() {
        let temp_dir = tempdir().unwrap();
        create_example_boards(temp_dir.path()).unwrap();

        for name in ["glider", "blinker", "block", "beacon", "boat"] {
            assert!(temp_dir.path().join(format!("{}.txt", name)).exists());
        }

        let glider = load_board(
            temp_dir.path().join("glider.txt"),
            BoardFormat::Text,
            EdgePolicy::Dead,
        ).unwrap();
        assert_eq!(glider.width(), 5);
        assert_eq!(glider.height(), 5);
        assert_eq!(glider.living_count(), 5);
    }
}
