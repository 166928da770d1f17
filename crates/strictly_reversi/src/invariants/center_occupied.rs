//! Centre invariant: the four starting cells are never empty.

use super::Invariant;
use crate::{Coordinate, Game};

/// Invariant: the four centre cells always hold a disk.
///
/// They are filled at the start and disks are only ever flipped, never
/// removed.
pub struct CenterOccupiedInvariant;

impl Invariant<Game> for CenterOccupiedInvariant {
    fn holds(game: &Game) -> bool {
        [(3, 3), (4, 3), (3, 4), (4, 4)]
            .into_iter()
            .filter_map(|(x, y)| Coordinate::new(x, y))
            .all(|c| !game.board().is_empty(c))
    }

    fn description() -> &'static str {
        "Centre cells are occupied"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, CellState, PlayerModes, TurnController};

    #[test]
    fn test_new_game_holds() {
        assert!(CenterOccupiedInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_cleared_centre_violates() {
        let mut board = Board::new();
        board.set_disk(Coordinate::new(4, 4).unwrap(), CellState::Empty);
        let game = Game::from_parts(board, TurnController::new(), PlayerModes::default());
        assert!(!CenterOccupiedInvariant::holds(&game));
    }
}
