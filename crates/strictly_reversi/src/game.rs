//! Complete game state: board, turn and player modes.

use crate::board::Board;
use crate::modes::PlayerModes;
use crate::persistence::GameRecord;
use crate::turn::{GameStatus, TurnAdvance, TurnController};
use crate::types::Disk;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Everything a save file captures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: TurnController,
    modes: PlayerModes,
}

impl Game {
    /// Standard start, dark to move, both sides manual.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a game from its parts.
    pub fn from_parts(board: Board, turn: TurnController, modes: PlayerModes) -> Self {
        Self { board, turn, modes }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns the turn controller.
    pub fn turn(&self) -> &TurnController {
        &self.turn
    }

    /// Mutable turn controller access.
    pub fn turn_mut(&mut self) -> &mut TurnController {
        &mut self.turn
    }

    /// Side to move, `None` once the game is over.
    pub fn current_side(&self) -> Option<Disk> {
        self.turn.turn()
    }

    /// Returns the player modes.
    pub fn modes(&self) -> &PlayerModes {
        &self.modes
    }

    /// Mutable player mode access.
    pub fn modes_mut(&mut self) -> &mut PlayerModes {
        &mut self.modes
    }

    /// Disk counts `(dark, light)`.
    pub fn counts(&self) -> (usize, usize) {
        (
            self.board.count_disks(Disk::Dark),
            self.board.count_disks(Disk::Light),
        )
    }

    /// Advances the turn against the current board.
    pub fn advance_turn(&mut self) -> TurnAdvance {
        self.turn.advance(&self.board)
    }

    /// Status line.
    pub fn status(&self) -> GameStatus {
        self.turn.status(&self.board)
    }

    /// Winner by disk count, `None` on a tie.
    pub fn winner(&self) -> Option<Disk> {
        TurnController::winner(&self.board)
    }

    /// Back to the starting position with both sides manual.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn.reset();
        self.modes = PlayerModes::default();
        info!("New game");
    }

    /// Snapshot for persistence.
    pub fn to_record(&self) -> GameRecord {
        GameRecord::new(self.turn.turn(), self.modes, self.board.clone())
    }

    /// Builds a game from a decoded record.
    pub fn from_record(record: GameRecord) -> Self {
        let (turn, modes, board) = record.into_parts();
        Self::from_parts(board, TurnController::with_turn(turn), modes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerMode;

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.current_side(), Some(Disk::Dark));
        assert_eq!(game.counts(), (2, 2));
        assert_eq!(game.modes().get(Disk::Light), PlayerMode::Manual);
    }

    #[test]
    fn test_reset_restores_manual_modes() {
        let mut game = Game::new();
        game.modes_mut().set(Disk::Dark, PlayerMode::Automated);
        *game.turn_mut() = TurnController::with_turn(None);
        game.reset();
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_record_round_trip() {
        let mut game = Game::new();
        game.modes_mut().set(Disk::Light, PlayerMode::Automated);
        let restored = Game::from_record(game.to_record());
        assert_eq!(restored, game);
    }
}
