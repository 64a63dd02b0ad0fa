//! Counts invariant: scores and free squares agree with the board.

use super::Invariant;
use crate::position::SQUARE_COUNT;
use crate::{GameState, Player};

/// Invariant: each score equals the squares that player owns, and scores
/// plus free squares cover the whole board.
pub struct CountsConsistentInvariant;

impl Invariant<GameState> for CountsConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let x = state.score(Player::X);
        let o = state.score(Player::O);
        x == board.count(Player::X)
            && o == board.count(Player::O)
            && x + o + state.free_squares() == SQUARE_COUNT
    }

    fn description() -> &'static str {
        "Scores and free squares match the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_holds() {
        assert!(CountsConsistentInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_full_game_holds() {
        let mut state = GameState::new();
        for (row, column) in [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (1, 1),
            (2, 0),
            (2, 2),
            (2, 1),
        ] {
            state.play(row, column).unwrap();
        }
        assert_eq!(state.free_squares(), 0);
        assert!(CountsConsistentInvariant::holds(&state));
    }
}
