//! Morpion game model - a 3x3 tic-tac-toe engine
//!
//! The model owns the board, whose turn it is, the winner, per-player scores
//! and the free-square count. Everything changes through two operations,
//! [`GameState::play`] and [`GameState::restart`]; everything else is a
//! read-only query a frontend can draw from.
//!
//! # Example
//!
//! ```
//! use morpion_model::{GameState, PlayOutcome, Player};
//!
//! let mut state = GameState::new();
//! for (row, column) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
//!     state.play(row, column).unwrap();
//! }
//! let outcome = state.play(0, 2).unwrap();
//! assert!(matches!(outcome, PlayOutcome::Won { winner: Player::X, .. }));
//! assert_eq!(state.end_of_game_message(), "Game over: player 1 (X) wins");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod state;
mod types;

pub use action::{Move, MoveError, PlayOutcome};
pub use game::{Game, GameEvent, SubscriptionId};
pub use position::{BOARD_SIZE, Position, SQUARE_COUNT};
pub use rules::WinningLine;
pub use state::{GameState, Scores, SnapshotError};
pub use types::{Board, GameStatus, Player, Square};
