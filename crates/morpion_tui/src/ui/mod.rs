//! Screen layout: the board on the left, scores and messages on the right.

pub mod board;

use crate::app::App;
use board::{BOARD_HEIGHT, BOARD_WIDTH, render_board};
use morpion_model::{GameState, Player};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

const PANEL_WIDTH: u16 = 34;

/// Score line for `player`, e.g. "3 squares for X".
pub fn score_label(state: &GameState, player: Player) -> String {
    let score = state.score(player);
    let noun = if score == 1 { "square" } else { "squares" };
    format!("{} {} for {}", score, noun, player)
}

/// Free-square line, e.g. "9 free squares".
pub fn free_squares_label(state: &GameState) -> String {
    let free = state.free_squares();
    let noun = if free == 1 { "square" } else { "squares" };
    format!("{} free {}", free, noun)
}

/// Draws the whole screen.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(PANEL_WIDTH)])
        .split(f.area());

    let board_block = Block::default().borders(Borders::ALL).title(" Morpion ");
    let inner = board_block.inner(chunks[0]);
    f.render_widget(board_block, chunks[0]);

    if inner.width >= BOARD_WIDTH && inner.height >= BOARD_HEIGHT {
        let board_area = center_rect(inner, BOARD_WIDTH, BOARD_HEIGHT);
        render_board(f, board_area, app);
        app.set_board_area(Some(board_area));
    } else {
        f.render_widget(Paragraph::new("Terminal too small"), inner);
        app.set_board_area(None);
    }

    render_panel(f, chunks[1], app);
}

fn render_panel(f: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let palette = app.palette();
    let mut lines = Vec::new();

    for player in Player::iter() {
        let style = if !state.is_over() && state.turn() == player {
            Style::default().bg(palette.turn).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(score_label(state, player), style)));
    }
    if !state.is_over() {
        lines.push(Line::from(free_squares_label(state)));
    }
    lines.push(Line::default());

    let message = state.end_of_game_message();
    if !message.is_empty() {
        lines.push(Line::from(Span::styled(
            message,
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(notice) = app.notice() {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(palette.occupied),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from("arrows/1-9  move"));
    lines.push(Line::from("enter/click play"));
    lines.push(Line::from("r           restart"));
    lines.push(Line::from("q           quit"));

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Score "))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width.min(area.width),
        height.min(area.height),
    )
}
