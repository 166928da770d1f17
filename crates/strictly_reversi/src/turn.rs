//! Turn state machine: whose move it is, forced passes and game end.

use crate::board::Board;
use crate::rules::has_legal_move;
use crate::types::Disk;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Result of [`TurnController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAdvance {
    /// The side now to move has at least one legal move.
    Turn(Disk),
    /// The side now to move has no legal move but its opponent does.
    /// After the pass is acknowledged, call `advance` again.
    Pass(Disk),
    /// Neither side can move.
    GameOver,
}

/// Game status for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Play continues with this side to move.
    InProgress(Disk),
    /// Game over with a winner.
    Won(Disk),
    /// Game over with equal disk counts.
    Tied,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress(side) => write!(f, "{}'s turn", side),
            GameStatus::Won(side) => write!(f, "{} won", side),
            GameStatus::Tied => write!(f, "Tied"),
        }
    }
}

/// Holds the current turn, `None` once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnController {
    turn: Option<Disk>,
}

impl TurnController {
    /// Dark to move.
    pub fn new() -> Self {
        Self {
            turn: Some(Disk::Dark),
        }
    }

    /// Restores a controller with an explicit turn.
    pub fn with_turn(turn: Option<Disk>) -> Self {
        Self { turn }
    }

    /// Side to move, or `None` when the game is over.
    pub fn turn(&self) -> Option<Disk> {
        self.turn
    }

    /// True once neither side can move.
    pub fn is_game_over(&self) -> bool {
        self.turn.is_none()
    }

    /// Back to dark's turn.
    pub fn reset(&mut self) {
        self.turn = Some(Disk::Dark);
    }

    /// Hands the turn to the opponent of the current side.
    ///
    /// Call after a placement completes, or again after a pass has been
    /// acknowledged. Terminal once the game is over.
    #[instrument(skip(self, board), fields(from = ?self.turn))]
    pub fn advance(&mut self, board: &Board) -> TurnAdvance {
        let Some(current) = self.turn else {
            return TurnAdvance::GameOver;
        };

        let next = current.flipped();
        self.turn = Some(next);

        if has_legal_move(board, next) {
            debug!(?next, "Turn advanced");
            return TurnAdvance::Turn(next);
        }

        if has_legal_move(board, current) {
            info!(?next, "No legal move, pass");
            TurnAdvance::Pass(next)
        } else {
            self.turn = None;
            info!(
                dark = board.count_disks(Disk::Dark),
                light = board.count_disks(Disk::Light),
                "Game over"
            );
            TurnAdvance::GameOver
        }
    }

    /// Side with strictly more disks, `None` on a tie.
    ///
    /// Only meaningful once the game is over.
    pub fn winner(board: &Board) -> Option<Disk> {
        let dark = board.count_disks(Disk::Dark);
        let light = board.count_disks(Disk::Light);
        match dark.cmp(&light) {
            std::cmp::Ordering::Greater => Some(Disk::Dark),
            std::cmp::Ordering::Less => Some(Disk::Light),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Status line for the current state.
    pub fn status(&self, board: &Board) -> GameStatus {
        match self.turn {
            Some(side) => GameStatus::InProgress(side),
            None => match Self::winner(board) {
                Some(side) => GameStatus::Won(side),
                None => GameStatus::Tied,
            },
        }
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    fn at(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    #[test]
    fn test_initial_turn_dark() {
        assert_eq!(TurnController::new().turn(), Some(Disk::Dark));
    }

    #[test]
    fn test_normal_alternation() {
        let mut board = Board::new();
        board.set_disk(at(3, 2), Disk::Dark);
        board.set_disk(at(3, 3), Disk::Dark);

        let mut turn = TurnController::new();
        assert_eq!(turn.advance(&board), TurnAdvance::Turn(Disk::Light));
        assert_eq!(turn.turn(), Some(Disk::Light));
    }

    #[test]
    fn test_pass_when_opponent_stuck() {
        // Light's only disk is bracketed away; dark still has a move.
        let mut board = Board::empty();
        board.set_disk(at(0, 0), Disk::Dark);
        board.set_disk(at(1, 0), Disk::Light);
        board.set_disk(at(3, 0), Disk::Dark);
        board.set_disk(at(4, 0), Disk::Dark);

        let mut turn = TurnController::new();
        // Dark just moved; light has no move.
        assert_eq!(turn.advance(&board), TurnAdvance::Pass(Disk::Light));
        assert_eq!(turn.turn(), Some(Disk::Light));
        // Acknowledged pass hands the turn back.
        assert_eq!(turn.advance(&board), TurnAdvance::Turn(Disk::Dark));
    }

    #[test]
    fn test_game_over_when_both_stuck() {
        let mut board = Board::empty();
        board.set_disk(at(0, 0), Disk::Dark);
        board.set_disk(at(7, 7), Disk::Light);

        let mut turn = TurnController::new();
        assert_eq!(turn.advance(&board), TurnAdvance::GameOver);
        assert!(turn.is_game_over());
        // Terminal.
        assert_eq!(turn.advance(&board), TurnAdvance::GameOver);
        assert_eq!(turn.turn(), None);
    }

    #[test]
    fn test_winner_and_tie() {
        let mut board = Board::empty();
        board.set_disk(at(0, 0), Disk::Dark);
        board.set_disk(at(1, 0), Disk::Dark);
        board.set_disk(at(7, 7), Disk::Light);
        assert_eq!(TurnController::winner(&board), Some(Disk::Dark));

        board.set_disk(at(6, 7), Disk::Light);
        assert_eq!(TurnController::winner(&board), None);

        let over = TurnController::with_turn(None);
        assert_eq!(over.status(&board), GameStatus::Tied);
    }
}
