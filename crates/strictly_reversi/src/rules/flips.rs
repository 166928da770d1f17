//! Flip detection.

use crate::board::Board;
use crate::types::{CellState, Coordinate, Disk};
use tracing::instrument;

/// Scan direction. `y` grows downwards, so `N` is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Direction {
    /// Up and left.
    NW,
    /// Up.
    N,
    /// Up and right.
    NE,
    /// Right.
    E,
    /// Down and right.
    SE,
    /// Down.
    S,
    /// Down and left.
    SW,
    /// Left.
    W,
}

impl Direction {
    /// Scan order. Flip lists are concatenated in this order, and animations
    /// replay them in the same order.
    pub const ALL: [Direction; 8] = [
        Direction::NW,
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
    ];

    /// Step `(dx, dy)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::NW => (-1, -1),
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
        }
    }
}

/// Coordinates that placing `disk` at `target` would flip.
///
/// Empty when the target is occupied or brackets nothing.
#[instrument(skip(board), level = "trace")]
pub fn flipped_coordinates(board: &Board, disk: Disk, target: Coordinate) -> Vec<Coordinate> {
    if !board.is_empty(target) {
        return Vec::new();
    }

    let mut flipped = Vec::new();
    for direction in Direction::ALL {
        flipped.extend(bracketed_run(board, disk, target, direction));
    }
    flipped
}

/// Opponent disks between `target` and the next `disk` along `direction`.
/// Empty when an empty cell or the edge comes first.
fn bracketed_run(board: &Board, disk: Disk, target: Coordinate, direction: Direction) -> Vec<Coordinate> {
    let (dx, dy) = direction.delta();
    let mut x = target.x() as isize;
    let mut y = target.y() as isize;
    let mut run = Vec::new();

    loop {
        x += dx;
        y += dy;
        match board.disk_at(x, y) {
            CellState::Occupied(found) if found == disk => return run,
            CellState::Occupied(_) => match Coordinate::from_signed(x, y) {
                Some(c) => run.push(c),
                None => return Vec::new(),
            },
            // Empty cells and the edge both read as empty.
            CellState::Empty => return Vec::new(),
        }
    }
}
