//! Tic-tac-toe board rendering.

use crate::app::App;
use morpion_model::{BOARD_SIZE, Player, Position, SQUARE_COUNT, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::Paragraph,
};

const SQUARE_WIDTH: u16 = 9;
const SQUARE_HEIGHT: u16 = 3;

/// Width of the board including separators.
pub const BOARD_WIDTH: u16 = SQUARE_WIDTH * 3 + 2;
/// Height of the board including separators.
pub const BOARD_HEIGHT: u16 = SQUARE_HEIGHT * 3 + 2;

/// Screen area of each square, indexed like [`Position::to_index`].
///
/// `area` is the board's top-left corner; only its origin is used.
pub fn square_areas(area: Rect) -> [Rect; SQUARE_COUNT] {
    Position::ALL.map(|pos| {
        Rect::new(
            area.x + pos.column() as u16 * (SQUARE_WIDTH + 1),
            area.y + pos.row() as u16 * (SQUARE_HEIGHT + 1),
            SQUARE_WIDTH,
            SQUARE_HEIGHT,
        )
    })
}

/// Renders the tic-tac-toe board into `area`.
pub fn render_board(f: &mut Frame, area: Rect, app: &App) {
    for (pos, square_area) in Position::ALL.into_iter().zip(square_areas(area)) {
        render_square(f, square_area, app, pos);
    }
    render_separators(f, area);
}

fn render_square(f: &mut Frame, area: Rect, app: &App, pos: Position) {
    let state = app.state();
    let palette = app.palette();
    let square = state.board().get(pos);

    let (symbol, style) = match square {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(player) => {
            let fg = match player {
                Player::X => palette.x,
                Player::O => palette.o,
            };
            (
                player.symbol().to_string(),
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            )
        }
    };

    // Once the game is over only the winning line stays colored.
    let background = if state.is_winning_square(pos.row(), pos.column()) {
        Some(palette.winning)
    } else if state.is_over() {
        None
    } else if !square.is_empty() {
        Some(palette.occupied)
    } else if app.hover() == Some(pos) && state.is_legal_at(pos) {
        Some(palette.legal)
    } else {
        None
    };
    let style = match background {
        Some(bg) => style.bg(bg),
        None => style,
    };

    let label = if app.cursor() == pos {
        format!("[ {} ]", symbol)
    } else {
        symbol
    };

    let text = Text::from(vec![Line::default(), Line::from(label), Line::default()]);
    let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_separators(f: &mut Frame, area: Rect) {
    let sep_style = Style::default().fg(Color::DarkGray);
    let horizontal = separator_row();

    for row in 0..BOARD_SIZE as u16 {
        for line in 0..SQUARE_HEIGHT {
            for col in 1..BOARD_SIZE as u16 {
                let x = area.x + col * (SQUARE_WIDTH + 1) - 1;
                let y = area.y + row * (SQUARE_HEIGHT + 1) + line;
                f.render_widget(Paragraph::new("│").style(sep_style), Rect::new(x, y, 1, 1));
            }
        }
        if row + 1 < BOARD_SIZE as u16 {
            let y = area.y + (row + 1) * (SQUARE_HEIGHT + 1) - 1;
            f.render_widget(
                Paragraph::new(horizontal.as_str()).style(sep_style),
                Rect::new(area.x, y, BOARD_WIDTH, 1),
            );
        }
    }
}

fn separator_row() -> String {
    let segment = "─".repeat(SQUARE_WIDTH as usize);
    [segment.as_str(); BOARD_SIZE].join("┼")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_areas_do_not_overlap() {
        let areas = square_areas(Rect::new(2, 1, BOARD_WIDTH, BOARD_HEIGHT));
        assert_eq!(areas[0], Rect::new(2, 1, SQUARE_WIDTH, SQUARE_HEIGHT));
        assert_eq!(areas[8].right(), 2 + BOARD_WIDTH);
        assert_eq!(areas[8].bottom(), 1 + BOARD_HEIGHT);
        for (i, a) in areas.iter().enumerate() {
            for b in &areas[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }

    #[test]
    fn test_separator_row_spans_board() {
        assert_eq!(separator_row().chars().count(), BOARD_WIDTH as usize);
    }
}
