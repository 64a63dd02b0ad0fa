//! Game state: the board plus turn, winner and score bookkeeping.

use crate::action::{Move, MoveError, PlayOutcome};
use crate::invariants::{GameInvariants, InvariantSet};
use crate::position::{Position, SQUARE_COUNT};
use crate::rules::{self, WinningLine};
use crate::types::{Board, GameStatus, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Squares claimed by each player during the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    x: usize,
    o: usize,
}

impl Scores {
    /// Score of `player`.
    pub fn get(&self, player: Player) -> usize {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn increment(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// Complete state of one tic-tac-toe game.
///
/// All mutation goes through [`GameState::play`] and [`GameState::restart`].
/// A refused move leaves every field untouched.
///
/// Deserialization rejects snapshots whose fields contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameStateSnapshot")]
pub struct GameState {
    board: Board,
    turn: Player,
    winner: Option<Player>,
    winning_line: Option<WinningLine>,
    scores: Scores,
    free_squares: usize,
    history: Vec<Move>,
}

/// A deserialized game whose fields do not describe a reachable position.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Inconsistent game snapshot: {}", reason)]
pub struct SnapshotError {
    /// What did not add up.
    pub reason: String,
}

impl SnapshotError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Raw serialized fields, validated before becoming a [`GameState`].
#[derive(Deserialize)]
struct GameStateSnapshot {
    board: Board,
    turn: Player,
    winner: Option<Player>,
    winning_line: Option<WinningLine>,
    scores: Scores,
    free_squares: usize,
    history: Vec<Move>,
}

impl TryFrom<GameStateSnapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: GameStateSnapshot) -> Result<Self, Self::Error> {
        let state = Self {
            board: snapshot.board,
            turn: snapshot.turn,
            winner: snapshot.winner,
            winning_line: snapshot.winning_line,
            scores: snapshot.scores,
            free_squares: snapshot.free_squares,
            history: snapshot.history,
        };

        if let Err(violations) = GameInvariants::check_all(&state) {
            let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(SnapshotError::new(reasons.join("; ")));
        }
        state.check_outcome()?;
        Ok(state)
    }
}

impl GameState {
    /// Creates a new game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            winner: None,
            winning_line: None,
            scores: Scores::default(),
            free_squares: SQUARE_COUNT,
            history: Vec::new(),
        }
    }

    /// Places the current player's mark at `(row, column)`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfBounds`] if the coordinates are off the board.
    /// - [`MoveError::GameOver`] once the game has been won or drawn.
    /// - [`MoveError::SquareOccupied`] if the square is taken.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn play(&mut self, row: usize, column: usize) -> Result<PlayOutcome, MoveError> {
        let pos =
            Position::from_row_col(row, column).ok_or(MoveError::OutOfBounds { row, column })?;
        self.play_at(pos)
    }

    /// Places the current player's mark at `pos`.
    ///
    /// # Errors
    ///
    /// Same as [`GameState::play`], minus the bounds check.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn play_at(&mut self, pos: Position) -> Result<PlayOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let mover = self.turn;
        self.board.set(pos, Square::Occupied(mover));
        self.scores.increment(mover);
        self.free_squares -= 1;
        self.history.push(Move::new(mover, pos));
        debug!(
            player = %mover,
            position = %pos,
            free_squares = self.free_squares,
            "Move played"
        );

        let outcome = if let Some(line) = rules::winning_line(&self.board, mover) {
            // Turn stays with the winner.
            self.winner = Some(mover);
            self.winning_line = Some(line);
            info!(winner = %mover, ?line, "Game won");
            PlayOutcome::Won {
                winner: mover,
                line,
            }
        } else {
            self.turn = mover.opponent();
            if rules::is_full(&self.board) {
                info!("Game drawn");
                PlayOutcome::Draw
            } else {
                PlayOutcome::Continue { next: self.turn }
            }
        };

        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "game invariants violated after {:?}",
            outcome
        );
        Ok(outcome)
    }

    /// Checks winner, winning line and turn against the board.
    fn check_outcome(&self) -> Result<(), SnapshotError> {
        let x_line = rules::winning_line(&self.board, Player::X);
        let o_line = rules::winning_line(&self.board, Player::O);
        let expected_line = match self.winner {
            Some(Player::X) if o_line.is_none() => x_line,
            Some(Player::O) if x_line.is_none() => o_line,
            Some(_) => return Err(SnapshotError::new("both players have a line")),
            None if x_line.is_some() || o_line.is_some() => {
                return Err(SnapshotError::new("completed line without a winner"));
            }
            None => None,
        };
        if expected_line.is_none() && self.winner.is_some() {
            return Err(SnapshotError::new("winner without a completed line"));
        }
        if self.winning_line != expected_line {
            return Err(SnapshotError::new("winning line does not match the board"));
        }

        let expected_turn = match self.winner {
            Some(winner) => winner,
            None if self.board.count(Player::X) == self.board.count(Player::O) => Player::X,
            None => Player::O,
        };
        if self.turn != expected_turn {
            return Err(SnapshotError::new(format!(
                "{} to move, expected {}",
                self.turn, expected_turn
            )));
        }
        Ok(())
    }

    /// Resets every field to its initial value.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        *self = Self::new();
        debug!("Game restarted");
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Square at `(row, column)`, or `None` off the board.
    pub fn square(&self, row: usize, column: usize) -> Option<Square> {
        Position::from_row_col(row, column).map(|pos| self.board.get(pos))
    }

    /// Player to move next.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Winner, if a line has been completed.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Number of squares `player` has claimed this game.
    pub fn score(&self, player: Player) -> usize {
        self.scores.get(player)
    }

    /// Number of empty squares.
    pub fn free_squares(&self) -> usize {
        self.free_squares
    }

    /// Moves accepted since the last restart.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The completed line, once the game is won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// True when `(row, column)` belongs to the winning line.
    pub fn is_winning_square(&self, row: usize, column: usize) -> bool {
        match (Position::from_row_col(row, column), self.winning_line) {
            (Some(pos), Some(line)) => line.contains(&pos),
            _ => false,
        }
    }

    /// Current phase of the game.
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(player) => GameStatus::Won(player),
            None if rules::is_full(&self.board) => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// True once the game has been won or the board is full.
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// True when the current player may play at `(row, column)`.
    pub fn is_legal(&self, row: usize, column: usize) -> bool {
        Position::from_row_col(row, column).is_some_and(|pos| self.is_legal_at(pos))
    }

    /// True when the current player may play at `pos`.
    pub fn is_legal_at(&self, pos: Position) -> bool {
        !self.is_over() && self.board.is_empty(pos)
    }

    /// Every position the current player may play at.
    pub fn legal_moves(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| self.is_legal_at(*pos))
            .collect()
    }

    /// Message for the end of the game; empty while it is still going.
    pub fn end_of_game_message(&self) -> String {
        match self.status() {
            GameStatus::InProgress => String::new(),
            GameStatus::Draw => "Game over: draw".to_string(),
            GameStatus::Won(player) => {
                format!("Game over: player {} ({}) wins", player.number(), player)
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(state: &mut GameState, moves: &[(usize, usize)]) {
        for &(row, column) in moves {
            state.play(row, column).expect("legal move");
        }
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.turn(), Player::X);
        assert_eq!(state.winner(), None);
        assert_eq!(state.free_squares(), 9);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(state.end_of_game_message().is_empty());
        assert!(state.board().squares().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_move_updates_bookkeeping() {
        let mut state = GameState::new();
        let outcome = state.play(0, 0).unwrap();
        assert_eq!(outcome, PlayOutcome::Continue { next: Player::O });
        assert_eq!(state.square(0, 0), Some(Square::Occupied(Player::X)));
        assert_eq!(state.score(Player::X), 1);
        assert_eq!(state.score(Player::O), 0);
        assert_eq!(state.free_squares(), 8);
        assert_eq!(state.turn(), Player::O);
        assert!(!state.is_legal(0, 0));
    }

    #[test]
    fn test_winning_move_keeps_turn() {
        let mut state = GameState::new();
        play_all(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let outcome = state.play(0, 2).unwrap();
        assert!(matches!(outcome, PlayOutcome::Won { winner: Player::X, .. }));
        assert_eq!(state.turn(), Player::X);
        assert_eq!(state.end_of_game_message(), "Game over: player 1 (X) wins");
    }

    #[test]
    fn test_o_wins_column() {
        let mut state = GameState::new();
        play_all(&mut state, &[(0, 0), (0, 1), (2, 2), (1, 1), (1, 0)]);
        let outcome = state.play(2, 1).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::Won {
                winner: Player::O,
                line: [Position::TopCenter, Position::Center, Position::BottomCenter],
            }
        );
        assert!(state.is_winning_square(1, 1));
        assert!(!state.is_winning_square(0, 0));
        assert_eq!(state.end_of_game_message(), "Game over: player 2 (O) wins");
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut state = GameState::new();
        assert_eq!(
            state.play(3, 1),
            Err(MoveError::OutOfBounds { row: 3, column: 1 })
        );
        assert_eq!(state, GameState::new());
        assert!(!state.is_legal(0, 7));
        assert_eq!(state.square(5, 5), None);
    }

    #[test]
    fn test_game_over_checked_before_occupancy() {
        let mut state = GameState::new();
        play_all(&mut state, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(state.play(0, 0), Err(MoveError::GameOver));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_restart_clears_history() {
        let mut state = GameState::new();
        play_all(&mut state, &[(1, 1), (0, 0)]);
        assert_eq!(state.history().len(), 2);
        state.restart();
        assert!(state.history().is_empty());
        assert_eq!(state.legal_moves().len(), 9);
    }
}
