//! Contract-based validation for placements.
//!
//! Contracts formalise Hoare-style reasoning: {P} action {Q}.
//! Preconditions are always checked; postconditions in debug builds.

use crate::action::{Placement, PlacementError};
use crate::board::Board;
use crate::game::Game;
use crate::invariants::{InvariantSet, ReversiInvariants, describe};
use crate::rules::flipped_coordinates;
use crate::types::Disk;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), PlacementError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S, action: &A) -> Result<(), PlacementError>;
}

/// Precondition: the placement still matches the board.
///
/// A placement computed earlier (an automated move picked when its timer
/// was armed) is stale if the board changed since.
pub struct PlacementStillValid;

impl PlacementStillValid {
    /// Recomputes the flip list and compares.
    #[instrument(skip(board, placement))]
    pub fn check(placement: &Placement, board: &Board) -> Result<(), PlacementError> {
        let current = flipped_coordinates(board, placement.disk(), placement.coordinate());
        if current.is_empty() || current != placement.flipped() {
            Err(PlacementError::Illegal(placement.disk(), placement.coordinate()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: it is the placing side's turn.
pub struct SidesTurn;

impl SidesTurn {
    /// Checks the game is running and `side` is to move.
    #[instrument(skip(game))]
    pub fn check(side: Disk, game: &Game) -> Result<(), PlacementError> {
        match game.current_side() {
            None => Err(PlacementError::GameOver),
            Some(current) if current != side => Err(PlacementError::WrongSide(side)),
            Some(_) => Ok(()),
        }
    }
}

/// Postcondition: the mover gains one disk plus every flip, the opponent
/// loses every flip, and the total grows by exactly one.
pub struct DiskConservation;

impl DiskConservation {
    /// Compares counts before and after.
    #[instrument(skip(before, after, placement))]
    pub fn holds(before: &Board, after: &Board, placement: &Placement) -> bool {
        let mover = placement.disk();
        let opponent = mover.flipped();
        let flips = placement.flipped().len();

        let valid = after.count_disks(mover) == before.count_disks(mover) + 1 + flips
            && after.count_disks(opponent) + flips == before.count_disks(opponent)
            && after.total_disks() == before.total_disks() + 1;
        if !valid {
            warn!(
                mover_before = before.count_disks(mover),
                mover_after = after.count_disks(mover),
                flips,
                "Disk conservation violated"
            );
        }
        valid
    }
}

/// Contract for applying a placement to a board.
///
/// Preconditions:
/// - The target is empty and the flip list is current
///
/// Postconditions:
/// - Disk counts are conserved
pub struct PlacementContract;

impl Contract<Board, Placement> for PlacementContract {
    fn pre(board: &Board, placement: &Placement) -> Result<(), PlacementError> {
        PlacementStillValid::check(placement, board)
    }

    fn post(before: &Board, after: &Board, placement: &Placement) -> Result<(), PlacementError> {
        if DiskConservation::holds(before, after, placement) {
            Ok(())
        } else {
            Err(PlacementError::InvariantViolation(format!(
                "Postcondition failed: disk counts not conserved by {}",
                placement
            )))
        }
    }
}

/// Checks the at-rest invariants, panicking in debug builds.
#[instrument(skip(game))]
pub fn assert_invariants(game: &Game) {
    if let Err(violations) = ReversiInvariants::check_all(game) {
        warn!(violations = %describe(&violations), "Invariant violated");
        debug_assert!(false, "Invariant violated: {:?}", violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellState, Coordinate};

    fn at(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    #[test]
    fn test_precondition_fresh_placement() {
        let board = Board::new();
        let placement = Placement::compute(&board, Disk::Dark, at(3, 2)).unwrap();
        assert!(PlacementContract::pre(&board, &placement).is_ok());
    }

    #[test]
    fn test_precondition_stale_placement() {
        let board = Board::new();
        let placement = Placement::compute(&board, Disk::Dark, at(3, 2)).unwrap();

        let mut changed = board.clone();
        changed.set_disk(at(3, 2), Disk::Light);
        assert!(matches!(
            PlacementContract::pre(&changed, &placement),
            Err(PlacementError::Illegal(..))
        ));
    }

    #[test]
    fn test_sides_turn() {
        let game = Game::new();
        assert!(SidesTurn::check(Disk::Dark, &game).is_ok());
        assert_eq!(SidesTurn::check(Disk::Light, &game), Err(PlacementError::WrongSide(Disk::Light)));
    }

    #[test]
    fn test_postcondition_holds_after_apply() {
        let before = Board::new();
        let placement = Placement::compute(&before, Disk::Dark, at(3, 2)).unwrap();
        let mut after = before.clone();
        placement.apply(&mut after);
        assert!(PlacementContract::post(&before, &after, &placement).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = Board::new();
        let placement = Placement::compute(&before, Disk::Dark, at(3, 2)).unwrap();
        let mut after = before.clone();
        placement.apply(&mut after);
        after.set_disk(at(4, 4), CellState::Empty);
        assert!(PlacementContract::post(&before, &after, &placement).is_err());
    }
}
