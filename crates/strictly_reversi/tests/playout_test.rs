//! Property tests: random playouts through the pure rules layer.

use proptest::prelude::*;
use strictly_reversi::invariants::{InvariantSet, ReversiInvariants};
use strictly_reversi::{
    Board, Coordinate, Disk, Game, GameRecord, Placement, PlayerMode, PlayerModes, TurnAdvance,
    TurnController, can_place, flipped_coordinates, legal_moves,
};

/// Plays choices[i] % legal_moves.len() at each turn until the game ends
/// or the choices run out, checking per-move properties along the way.
fn play_out(choices: &[usize]) -> Game {
    let mut board = Board::new();
    let mut turn = TurnController::new();

    for &choice in choices {
        let Some(side) = turn.turn() else {
            break;
        };
        let moves = legal_moves(&board, side);
        assert!(!moves.is_empty(), "side to move must have a legal move");

        let target = moves[choice % moves.len()];
        let placement = Placement::compute(&board, side, target).unwrap();
        let before = board.clone();
        placement.apply(&mut board);

        let flips = placement.flipped().len();
        assert!(flips >= 1);
        assert_eq!(board.count_disks(side), before.count_disks(side) + flips + 1);
        assert_eq!(board.count_disks(side.flipped()) + flips, before.count_disks(side.flipped()));

        if let TurnAdvance::Pass(_) = turn.advance(&board) {
            assert!(matches!(turn.advance(&board), TurnAdvance::Turn(s) if s == side));
        }
    }

    Game::from_parts(board, turn, PlayerModes::default())
}

fn all_cells() -> impl Iterator<Item = Coordinate> {
    Board::new().coordinates()
}

proptest! {
    #[test]
    fn legal_moves_match_flip_lists(choices in prop::collection::vec(0usize..64, 0..70)) {
        let game = play_out(&choices);
        for side in [Disk::Dark, Disk::Light] {
            let moves = legal_moves(game.board(), side);
            for cell in all_cells() {
                let flips = flipped_coordinates(game.board(), side, cell);
                prop_assert_eq!(can_place(game.board(), side, cell), !flips.is_empty());
                prop_assert_eq!(moves.contains(&cell), !flips.is_empty());
                if !game.board().is_empty(cell) {
                    prop_assert!(flips.is_empty());
                }
            }
            let mut sorted = moves.clone();
            sorted.sort_by_key(|c| (c.y(), c.x()));
            prop_assert_eq!(sorted, moves);
        }
    }

    #[test]
    fn playouts_stay_consistent(choices in prop::collection::vec(0usize..64, 0..70)) {
        let game = play_out(&choices);
        prop_assert!(ReversiInvariants::check_all(&game).is_ok());

        let (dark, light) = game.counts();
        prop_assert_eq!(dark + light, game.board().total_disks());
        prop_assert!(game.board().total_disks() <= 64);
    }

    #[test]
    fn saved_games_restore_exactly(
        choices in prop::collection::vec(0usize..64, 0..70),
        dark_auto in any::<bool>(),
        light_auto in any::<bool>(),
    ) {
        let mode = |auto: bool| if auto { PlayerMode::Automated } else { PlayerMode::Manual };
        let played = play_out(&choices);
        let game = Game::from_parts(
            played.board().clone(),
            *played.turn(),
            PlayerModes::new(mode(dark_auto), mode(light_auto)),
        );

        let text = game.to_record().encode();
        prop_assert_eq!(text.lines().count(), 9);
        prop_assert!(text.ends_with('\n'));

        let restored = Game::from_record(GameRecord::decode(&text).unwrap());
        prop_assert_eq!(restored, game);
    }
}

#[test]
fn test_full_game_always_terminates() {
    let game = play_out(&[0; 80]);
    assert_eq!(game.current_side(), None);
    assert!(ReversiInvariants::check_all(&game).is_ok());
}
