//! Observable game engine.
//!
//! [`Game`] owns a [`GameState`] and tells subscribers about every change,
//! so a frontend can react to moves without polling. Frontends that redraw
//! after each input can ignore subscriptions and just read [`Game::state`].

use crate::action::{Move, MoveError, PlayOutcome};
use crate::position::Position;
use crate::rules::WinningLine;
use crate::state::GameState;
use crate::types::Player;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A change to the game, sent to subscribers after it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mark was placed.
    MovePlayed(Move),
    /// The last move completed a line.
    GameWon {
        /// The player who completed the line.
        winner: Player,
        /// The completed line.
        line: WinningLine,
    },
    /// The last move filled the board without a line.
    GameDrawn,
    /// The game was reset.
    Restarted,
}

/// Handle returned by [`Game::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Tic-tac-toe game engine with change notifications.
pub struct Game {
    state: GameState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl Game {
    /// Creates a new game with no subscribers.
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Registers `callback` to run after every change, in subscription order.
    pub fn subscribe(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        debug!(?id, subscribers = self.subscribers.len(), "Subscriber added");
        id
    }

    /// Removes a subscriber. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Plays at `(row, column)`. See [`GameState::play`].
    ///
    /// # Errors
    ///
    /// Refused moves return the [`MoveError`] and notify nobody.
    #[instrument(skip(self))]
    pub fn play(&mut self, row: usize, column: usize) -> Result<PlayOutcome, MoveError> {
        let outcome = self.state.play(row, column)?;
        self.announce(outcome);
        Ok(outcome)
    }

    /// Plays at `pos`. See [`GameState::play_at`].
    ///
    /// # Errors
    ///
    /// Refused moves return the [`MoveError`] and notify nobody.
    #[instrument(skip(self))]
    pub fn play_at(&mut self, pos: Position) -> Result<PlayOutcome, MoveError> {
        let outcome = self.state.play_at(pos)?;
        self.announce(outcome);
        Ok(outcome)
    }

    /// Resets the game and notifies subscribers.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.state.restart();
        self.notify(&GameEvent::Restarted);
    }

    fn announce(&mut self, outcome: PlayOutcome) {
        if let Some(last) = self.state.history().last().copied() {
            self.notify(&GameEvent::MovePlayed(last));
        }
        match outcome {
            PlayOutcome::Won { winner, line } => self.notify(&GameEvent::GameWon { winner, line }),
            PlayOutcome::Draw => self.notify(&GameEvent::GameDrawn),
            PlayOutcome::Continue { .. } => {}
        }
    }

    fn notify(&mut self, event: &GameEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
