//! Turn invariants: the recorded turn agrees with the board.

use super::Invariant;
use crate::Game;
use crate::rules::has_legal_move;
use crate::types::Disk;

/// Invariant: while play continues, the side to move has a legal move.
///
/// Does not hold in the middle of a pass, only once the pass has been
/// acknowledged and the turn handed back.
pub struct SideToMoveCanMoveInvariant;

impl Invariant<Game> for SideToMoveCanMoveInvariant {
    fn holds(game: &Game) -> bool {
        match game.current_side() {
            Some(side) => has_legal_move(game.board(), side),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Side to move has a legal move"
    }
}

/// Invariant: a finished game has no legal move for either side.
pub struct GameOverIsFinalInvariant;

impl Invariant<Game> for GameOverIsFinalInvariant {
    fn holds(game: &Game) -> bool {
        if game.current_side().is_some() {
            return true;
        }
        Disk::sides().all(|side| !has_legal_move(game.board(), side))
    }

    fn description() -> &'static str {
        "Finished game has no legal moves"
    }
}
