//! Legal move generation.

use super::flips::flipped_coordinates;
use crate::board::Board;
use crate::types::{Coordinate, Disk};
use tracing::instrument;

/// True iff placing `disk` at `target` flips at least one disk.
pub fn can_place(board: &Board, disk: Disk, target: Coordinate) -> bool {
    !flipped_coordinates(board, disk, target).is_empty()
}

/// All legal placements for `side`, row-major (y outer, x inner).
#[instrument(skip(board), level = "debug")]
pub fn legal_moves(board: &Board, side: Disk) -> Vec<Coordinate> {
    board
        .coordinates()
        .filter(|c| can_place(board, side, *c))
        .collect()
}

/// True iff `side` has any legal placement.
pub fn has_legal_move(board: &Board, side: Disk) -> bool {
    board.coordinates().any(|c| can_place(board, side, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    #[test]
    fn test_opening_moves_dark() {
        let board = Board::new();
        assert_eq!(
            legal_moves(&board, Disk::Dark),
            vec![at(3, 2), at(2, 3), at(5, 4), at(4, 5)]
        );
    }

    #[test]
    fn test_opening_moves_light() {
        let board = Board::new();
        assert_eq!(
            legal_moves(&board, Disk::Light),
            vec![at(4, 2), at(5, 3), at(2, 4), at(3, 5)]
        );
    }

    #[test]
    fn test_empty_board_has_no_moves() {
        let board = Board::empty();
        assert!(legal_moves(&board, Disk::Dark).is_empty());
        assert!(!has_legal_move(&board, Disk::Light));
    }
}
