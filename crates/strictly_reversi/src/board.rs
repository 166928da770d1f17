//! 8×8 reversi board storage.

use crate::types::{CellState, Coordinate, Disk, HEIGHT, WIDTH};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::instrument;

/// Logical cell state of the whole grid. Storage only; rules live in
/// [`crate::rules`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Rows top to bottom, each row left to right.
    cells: [[CellState; WIDTH]; HEIGHT],
}

impl Board {
    /// Creates a board in the standard starting position.
    #[instrument]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Creates a board with no disks.
    pub fn empty() -> Self {
        Self {
            cells: [[CellState::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Cell at signed coordinates. Anything outside the grid reads as empty.
    pub fn disk_at(&self, x: isize, y: isize) -> CellState {
        Coordinate::from_signed(x, y)
            .map(|c| self.get(c))
            .unwrap_or(CellState::Empty)
    }

    /// Cell at an in-bounds coordinate.
    pub fn get(&self, coordinate: Coordinate) -> CellState {
        self.cells[coordinate.y()][coordinate.x()]
    }

    /// Overwrites a cell.
    pub fn set_disk(&mut self, coordinate: Coordinate, state: impl Into<CellState>) {
        self.cells[coordinate.y()][coordinate.x()] = state.into();
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, coordinate: Coordinate) -> bool {
        self.get(coordinate) == CellState::Empty
    }

    /// Number of disks of the given side, by full scan.
    pub fn count_disks(&self, side: Disk) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == CellState::Occupied(side))
            .count()
    }

    /// Total disks of both colours.
    pub fn total_disks(&self) -> usize {
        Disk::sides().map(|side| self.count_disks(side)).sum()
    }

    /// Clears the board and places the four starting disks.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [[CellState::Empty; WIDTH]; HEIGHT];
        for (x, y, disk) in [
            (3, 3, Disk::Light),
            (4, 4, Disk::Light),
            (4, 3, Disk::Dark),
            (3, 4, Disk::Dark),
        ] {
            if let Some(c) = Coordinate::new(x, y) {
                self.set_disk(c, disk);
            }
        }
    }

    /// Column range.
    pub fn x_range(&self) -> Range<usize> {
        0..WIDTH
    }

    /// Row range.
    pub fn y_range(&self) -> Range<usize> {
        0..HEIGHT
    }

    /// Every coordinate in row-major order (y outer, x inner).
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + use<> {
        (0..HEIGHT).flat_map(|y| (0..WIDTH).filter_map(move |x| Coordinate::new(x, y)))
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> &[[CellState; WIDTH]; HEIGHT] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
