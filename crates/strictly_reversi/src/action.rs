//! Placements as first-class actions.
//!
//! A placement is computed (and therefore validated) before it touches the
//! board, so the flip list can be logged, animated step by step, or checked
//! by contracts.

use crate::board::Board;
use crate::rules::flipped_coordinates;
use crate::types::{Coordinate, Disk};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A validated placement: the new disk plus the disks it flips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    disk: Disk,
    coordinate: Coordinate,
    flipped: Vec<Coordinate>,
}

impl Placement {
    /// Computes the placement of `disk` at `coordinate`.
    ///
    /// Fails when the target is occupied or flips nothing.
    #[instrument(skip(board))]
    pub fn compute(board: &Board, disk: Disk, coordinate: Coordinate) -> Result<Self, PlacementError> {
        let flipped = flipped_coordinates(board, disk, coordinate);
        if flipped.is_empty() {
            return Err(PlacementError::Illegal(disk, coordinate));
        }
        Ok(Self {
            disk,
            coordinate,
            flipped,
        })
    }

    /// Side placing the disk.
    pub fn disk(&self) -> Disk {
        self.disk
    }

    /// Target cell.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Flipped cells in scan order.
    pub fn flipped(&self) -> &[Coordinate] {
        &self.flipped
    }

    /// Target followed by flips: the order cells change on screen.
    pub fn steps(&self) -> impl Iterator<Item = Coordinate> + '_ {
        std::iter::once(self.coordinate).chain(self.flipped.iter().copied())
    }

    /// Writes every step to the board at once.
    pub fn apply(&self, board: &mut Board) {
        for c in self.steps() {
            board.set_disk(c, self.disk);
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} (flips {})", self.disk, self.coordinate, self.flipped.len())
    }
}

/// Error raised when a placement cannot be made.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// The target is occupied or flips nothing.
    #[display("{} cannot place at {}", _0, _1)]
    Illegal(Disk, Coordinate),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It is not this side's turn.
    #[display("It's not {}'s turn", _0)]
    WrongSide(Disk),

    /// The side to move is automated and does not take external input.
    #[display("{} is automated", _0)]
    AutomatedSide(Disk),

    /// A placement animation is still running.
    #[display("Animation in progress")]
    AnimationInProgress,

    /// A postcondition failed after applying the placement.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for PlacementError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    #[test]
    fn test_compute_legal() {
        let board = Board::new();
        let placement = Placement::compute(&board, Disk::Dark, at(3, 2)).unwrap();
        assert_eq!(placement.flipped(), &[at(3, 3)]);
        let steps: Vec<_> = placement.steps().collect();
        assert_eq!(steps, vec![at(3, 2), at(3, 3)]);
    }

    #[test]
    fn test_compute_illegal() {
        let board = Board::new();
        assert_eq!(
            Placement::compute(&board, Disk::Dark, at(0, 0)),
            Err(PlacementError::Illegal(Disk::Dark, at(0, 0)))
        );
        assert!(Placement::compute(&board, Disk::Dark, at(4, 3)).is_err());
    }

    #[test]
    fn test_apply() {
        let mut board = Board::new();
        let placement = Placement::compute(&board, Disk::Dark, at(3, 2)).unwrap();
        placement.apply(&mut board);
        assert_eq!(board.count_disks(Disk::Dark), 4);
        assert_eq!(board.count_disks(Disk::Light), 1);
    }
}
