//! Property-based tests for the game state.
//!
//! Random move sequences are applied to a fresh game; every refused move
//! must leave the state untouched and every accepted one must keep the
//! bookkeeping consistent.

use morpion_model::invariants::{GameInvariants, InvariantSet};
use morpion_model::{GameState, Player, Square};
use proptest::prelude::*;

/// Generate a random (row, column) pair, sometimes off the board.
fn arb_coords() -> impl Strategy<Value = (usize, usize)> {
    (0usize..4, 0usize..4)
}

fn arb_moves() -> impl Strategy<Value = Vec<(usize, usize)>> {
    proptest::collection::vec(arb_coords(), 0..20)
}

proptest! {
    #[test]
    fn accepted_moves_update_bookkeeping(moves in arb_moves()) {
        let mut state = GameState::new();
        for (row, column) in moves {
            let before = state.clone();
            let mover = before.turn();
            match state.play(row, column) {
                Ok(_) => {
                    prop_assert_eq!(state.square(row, column), Some(Square::Occupied(mover)));
                    prop_assert_eq!(state.score(mover), before.score(mover) + 1);
                    prop_assert_eq!(state.score(mover.opponent()), before.score(mover.opponent()));
                    prop_assert_eq!(state.free_squares(), before.free_squares() - 1);
                    if state.winner().is_some() {
                        prop_assert_eq!(state.turn(), mover);
                    } else {
                        prop_assert_eq!(state.turn(), mover.opponent());
                    }
                }
                Err(_) => prop_assert_eq!(&state, &before),
            }
        }
    }

    #[test]
    fn invariants_always_hold(moves in arb_moves()) {
        let mut state = GameState::new();
        for (row, column) in moves {
            let _ = state.play(row, column);
            prop_assert!(GameInvariants::check_all(&state).is_ok());
        }
    }

    #[test]
    fn game_over_matches_winner_or_full_board(moves in arb_moves()) {
        let mut state = GameState::new();
        for (row, column) in moves {
            let _ = state.play(row, column);
        }
        prop_assert_eq!(state.is_over(), state.winner().is_some() || state.free_squares() == 0);
        prop_assert_eq!(state.end_of_game_message().is_empty(), !state.is_over());
        if let Some(winner) = state.winner() {
            let line = state.winning_line().expect("winner has a line");
            for pos in line {
                prop_assert_eq!(state.board().get(pos), Square::Occupied(winner));
            }
        }
    }

    #[test]
    fn restart_returns_to_initial_state(moves in arb_moves()) {
        let mut state = GameState::new();
        for (row, column) in moves {
            let _ = state.play(row, column);
        }
        state.restart();
        prop_assert_eq!(&state, &GameState::new());
        state.restart();
        prop_assert_eq!(&state, &GameState::new());
        prop_assert_eq!(state.turn(), Player::X);
    }
}
