//! Application state and input handling.

use crate::config::Palette;
use crate::input::move_cursor;
use crate::ui::board::square_areas;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use morpion_model::{Game, GameEvent, GameState, Position};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

/// Main application state.
#[derive(Debug)]
pub struct App {
    game: Game,
    palette: Palette,
    cursor: Position,
    hover: Option<Position>,
    board_area: Option<Rect>,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates a new application with a fresh game.
    pub fn new(palette: Palette) -> Self {
        let mut game = Game::new();
        game.subscribe(log_event);
        Self {
            game,
            palette,
            cursor: Position::Center,
            hover: None,
            board_area: None,
            notice: None,
            should_quit: false,
        }
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    /// Board colors.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Square selected by the keyboard.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Square under the mouse pointer.
    pub fn hover(&self) -> Option<Position> {
        self.hover
    }

    /// Reason the last move was refused, until the next accepted move.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records where the board was drawn, for mouse hit-testing.
    ///
    /// `None` when the terminal was too small to draw it.
    pub fn set_board_area(&mut self, area: Option<Rect>) {
        self.board_area = area;
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                let index = c as usize - '1' as usize;
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            code => self.cursor = move_cursor(self.cursor, code),
        }
    }

    /// Handles mouse movement and clicks over the board.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let target = self.square_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => self.hover = target,
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(pos) = target {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            _ => {}
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game.restart();
        self.notice = None;
    }

    fn play(&mut self, pos: Position) {
        match self.game.play_at(pos) {
            Ok(_) => self.notice = None,
            Err(e) => {
                warn!(position = %pos, error = %e, "Move rejected");
                self.notice = Some(e.to_string());
            }
        }
    }

    fn square_at(&self, x: u16, y: u16) -> Option<Position> {
        let area = self.board_area?;
        square_areas(area)
            .iter()
            .position(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
            .and_then(Position::from_index)
    }
}

/// Logs every game change; subscribed to each game the frontend creates.
pub fn log_event(event: &GameEvent) {
    match event {
        GameEvent::MovePlayed(mov) => debug!(%mov, "Move played"),
        GameEvent::GameWon { winner, line } => info!(%winner, ?line, "Game won"),
        GameEvent::GameDrawn => info!("Game drawn"),
        GameEvent::Restarted => info!("Game restarted"),
    }
}
