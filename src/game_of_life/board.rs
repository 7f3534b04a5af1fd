//! Board representation and neighbour queries for Game of Life

use crate::config::EdgePolicy;
use crate::error::{LifeError, Result};
use itertools::iproduct;
use std::fmt;

/// Offsets of the eight Moore neighbours
fn neighbour_offsets() -> impl Iterator<Item = (isize, isize)> {
    iproduct!(-1isize..=1, -1isize..=1).filter(|&offset| offset != (0, 0))
}

/// One immutable snapshot of the automaton.
///
/// Cells are stored row-major in a flat vector of exactly `width * height`
/// entries. The engine never edits a board in place; `with_cell` and
/// `with_edge_policy` return new boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    edge_policy: EdgePolicy,
}

impl Board {
    /// Create an all-dead board
    pub fn new(width: usize, height: usize, edge_policy: EdgePolicy) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            edge_policy,
        })
    }

    /// Create a board from rows of cells
    pub fn from_rows(rows: Vec<Vec<bool>>, edge_policy: EdgePolicy) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::invalid_argument(format!(
                    "Row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
            edge_policy,
        })
    }

    /// Create a board with the listed `(row, col)` cells alive
    pub fn from_live_cells(
        width: usize,
        height: usize,
        live: &[(usize, usize)],
        edge_policy: EdgePolicy,
    ) -> Result<Self> {
        let mut board = Self::new(width, height, edge_policy)?;
        for &(row, col) in live {
            let idx = board.checked_index(row as isize, col as isize)?;
            board.cells[idx] = true;
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Flat row-major cell slice
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn checked_index(&self, row: isize, col: isize) -> Result<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.index(row as usize, col as usize))
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: isize, col: isize) -> Result<bool> {
        self.checked_index(row, col).map(|idx| self.cells[idx])
    }

    /// Count living neighbours of an in-bounds cell under the board's edge policy.
    ///
    /// On toroidal boards narrower or shorter than three cells, wrapped
    /// offsets can land on the same cell more than once and each hit counts.
    pub fn count_live_neighbors(&self, row: isize, col: isize) -> Result<u8> {
        self.checked_index(row, col)?;
        Ok(self.live_neighbors_unchecked(row as usize, col as usize))
    }

    /// Neighbour count for coordinates already known to be in bounds
    pub(crate) fn live_neighbors_unchecked(&self, row: usize, col: usize) -> u8 {
        neighbour_offsets()
            .filter(|&(dr, dc)| self.is_neighbor_alive(row as isize + dr, col as isize + dc))
            .count() as u8
    }

    /// Check if a neighbour at given coordinates is alive, handling the edge policy
    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        match self.edge_policy {
            EdgePolicy::Dead => self
                .checked_index(row, col)
                .map(|idx| self.cells[idx])
                .unwrap_or(false),
            EdgePolicy::Toroidal => {
                let wrapped_row = row.rem_euclid(self.height as isize) as usize;
                let wrapped_col = col.rem_euclid(self.width as isize) as usize;
                self.cells[self.index(wrapped_row, wrapped_col)]
            }
        }
    }

    /// Return a copy of the board with one cell changed
    pub fn with_cell(&self, row: isize, col: isize, alive: bool) -> Result<Self> {
        let idx = self.checked_index(row, col)?;
        let mut next = self.clone();
        next.cells[idx] = alive;
        Ok(next)
    }

    /// Return a copy of the board with a different edge policy
    pub fn with_edge_policy(&self, edge_policy: EdgePolicy) -> Self {
        Self {
            edge_policy,
            ..self.clone()
        }
    }

    /// Build a board of the same shape from freshly computed cells
    pub(crate) fn with_cells(&self, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            width: self.width,
            height: self.height,
            cells,
            edge_policy: self.edge_policy,
        }
    }

    /// All living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, &alive)| alive.then(|| (idx / self.width, idx % self.width)))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when no cell is alive
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Fraction of living cells, 0.0 to 1.0
    pub fn density(&self) -> f64 {
        self.living_count() as f64 / self.cells.len() as f64
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(LifeError::invalid_argument(format!(
            "Board dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    // Coordinates are signed, so every index must also fit in isize
    if width.checked_mul(height).map_or(true, |cells| cells > isize::MAX as usize) {
        return Err(LifeError::invalid_argument(format!(
            "Board dimensions {}x{} are too large",
            width, height
        )));
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                f.write_str(if cell { "█" } else { "·" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(4, 3, EdgePolicy::Dead).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.cells().len(), 12);
        assert_eq!(board.rows().count(), 3);
        assert!(board.is_empty());
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Board::new(0, 3, EdgePolicy::Dead),
            Err(LifeError::InvalidArgument(_))
        ));
        assert!(matches!(
            Board::from_rows(vec![], EdgePolicy::Dead),
            Err(LifeError::InvalidArgument(_))
        ));
        assert!(matches!(
            Board::from_rows(vec![vec![true, false], vec![true]], EdgePolicy::Dead),
            Err(LifeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            Board::new(usize::MAX, 2, EdgePolicy::Dead),
            Err(LifeError::InvalidArgument(_))
        ));
        assert!(matches!(
            Board::from_live_cells(usize::MAX / 2, 3, &[], EdgePolicy::Toroidal),
            Err(LifeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_board_from_rows() {
        let rows = vec![
            vec![true, false, true],
            vec![false, true, false],
        ];
        let board = Board::from_rows(rows.clone(), EdgePolicy::Dead).unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.living_count(), 3);
        assert_eq!(board.living_cells(), vec![(0, 0), (0, 2), (1, 1)]);

        let back: Vec<Vec<bool>> = board.rows().map(<[bool]>::to_vec).collect();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::new(3, 3, EdgePolicy::Dead).unwrap();
        assert!(matches!(board.get(-1, 0), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(board.get(3, 0), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(board.get(0, 3), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(board.count_live_neighbors(0, -1), Err(LifeError::OutOfBounds { .. })));
        assert!(!board.get(2, 2).unwrap());
    }

    #[test]
    fn test_neighbor_counting() {
        let rows = vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ];
        let board = Board::from_rows(rows, EdgePolicy::Dead).unwrap();

        assert_eq!(board.count_live_neighbors(1, 1).unwrap(), 8);
        // Corner sees two edge cells; the dead centre adds nothing
        assert_eq!(board.count_live_neighbors(0, 0).unwrap(), 2);
    }

    #[test]
    fn test_single_corner_cell_has_no_neighbours() {
        let board = Board::from_live_cells(3, 3, &[(0, 0)], EdgePolicy::Dead).unwrap();
        assert_eq!(board.count_live_neighbors(0, 0).unwrap(), 0);
        assert_eq!(board.count_live_neighbors(1, 1).unwrap(), 1);
        assert_eq!(board.count_live_neighbors(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_edge_policies() {
        let rows = vec![
            vec![true, false, false, false],
            vec![false, false, false, false],
            vec![false, false, false, false],
            vec![false, false, false, true],
        ];

        let dead = Board::from_rows(rows.clone(), EdgePolicy::Dead).unwrap();
        assert_eq!(dead.count_live_neighbors(0, 0).unwrap(), 0);
        assert_eq!(dead.count_live_neighbors(3, 0).unwrap(), 0);

        // (3,3) is the diagonal neighbour of (0,0) across both seams
        let torus = Board::from_rows(rows, EdgePolicy::Toroidal).unwrap();
        assert_eq!(torus.count_live_neighbors(0, 0).unwrap(), 1);
        assert_eq!(torus.count_live_neighbors(3, 0).unwrap(), 2);
    }

    #[test]
    fn test_small_torus_counts_repeated_neighbours() {
        let rows = vec![
            vec![true, false],
            vec![false, true],
        ];
        let torus = Board::from_rows(rows, EdgePolicy::Toroidal).unwrap();
        // Four of the eight wrapped offsets land on (1,1)
        assert_eq!(torus.count_live_neighbors(0, 0).unwrap(), 4);
    }

    #[test]
    fn test_with_cell_leaves_original_untouched() {
        let board = Board::new(2, 2, EdgePolicy::Dead).unwrap();
        let edited = board.with_cell(1, 0, true).unwrap();

        assert!(board.is_empty());
        assert!(edited.get(1, 0).unwrap());
        assert!(board.with_cell(2, 0, true).is_err());
    }

    #[test]
    fn test_from_live_cells_rejects_outside_cells() {
        let result = Board::from_live_cells(3, 3, &[(3, 1)], EdgePolicy::Dead);
        assert!(matches!(result, Err(LifeError::OutOfBounds { row: 3, col: 1, .. })));
    }

    #[test]
    fn test_density_and_display() {
        let board = Board::from_live_cells(2, 2, &[(0, 0)], EdgePolicy::Dead).unwrap();
        assert!((board.density() - 0.25).abs() < f64::EPSILON);
        assert_eq!(board.to_string(), "█·\n··\n");
    }
}
