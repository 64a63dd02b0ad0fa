//! History invariant: replaying the moves reproduces the board.

use super::Invariant;
use crate::{Board, GameState, Player, Square};

/// Invariant: the move history alternates from X, never overwrites a square,
/// and rebuilds exactly the current board.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = Board::new();
        let mut expected = Player::X;

        for mov in state.history() {
            if mov.player != expected || !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.player));
            expected = expected.opponent();
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic and match the move history"
    }
}
