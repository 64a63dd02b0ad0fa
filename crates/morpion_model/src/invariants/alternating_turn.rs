//! Alternating turn invariant: X leads by at most one mark.

use super::Invariant;
use crate::{GameState, Player};

/// Invariant: X owns as many squares as O, or exactly one more.
///
/// X always opens, and marks are placed one per turn.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Player::X);
        let o = state.board().count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}
