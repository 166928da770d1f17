//! First-class invariants for reversi.
//!
//! Invariants are properties of a [`Game`](crate::Game) at rest, that is
//! between turns: after a placement has been applied and the turn has been
//! advanced (including any acknowledged pass). They are checked in debug
//! builds after every turn and always when a saved game is restored.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Joins violation descriptions for error messages.
pub fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod center_occupied;
pub mod turn_consistent;

pub use center_occupied::CenterOccupiedInvariant;
pub use turn_consistent::{GameOverIsFinalInvariant, SideToMoveCanMoveInvariant};

/// All reversi invariants as a composable set.
pub type ReversiInvariants = (
    CenterOccupiedInvariant,
    SideToMoveCanMoveInvariant,
    GameOverIsFinalInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Coordinate, Disk, Game, PlayerModes, TurnController};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(ReversiInvariants::check_all(&Game::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_collects_every_violation() {
        // Empty board, dark to move: centre empty and dark cannot move.
        let game = Game::from_parts(Board::empty(), TurnController::new(), PlayerModes::default());
        let violations = ReversiInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
        let text = describe(&violations);
        assert!(text.contains(';'));
    }

    #[test]
    fn test_two_invariants_as_set() {
        let mut board = Board::new();
        board.set_disk(Coordinate::new(0, 0).unwrap(), Disk::Dark);
        let game = Game::from_parts(board, TurnController::new(), PlayerModes::default());

        type TurnInvariants = (SideToMoveCanMoveInvariant, GameOverIsFinalInvariant);
        assert!(TurnInvariants::check_all(&game).is_ok());
    }
}
