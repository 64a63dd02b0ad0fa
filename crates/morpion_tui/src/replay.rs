//! Headless replay: apply moves and print the resulting game.

use crate::app::log_event;
use crate::ui::{free_squares_label, score_label};
use anyhow::Result;
use morpion_model::{Game, GameState, Player};
use std::io::Write;
use tracing::{instrument, warn};

/// Plays `moves` in order, skipping refused ones, then prints the game.
#[instrument(skip_all, fields(count = moves.len()))]
pub fn run_replay(moves: &[(usize, usize)], out: &mut impl Write) -> Result<()> {
    let mut game = Game::new();
    game.subscribe(log_event);

    for &(row, column) in moves {
        if let Err(e) = game.play(row, column) {
            warn!(row, column, error = %e, "Move rejected");
            writeln!(out, "skipped {},{}: {}", row, column, e)?;
        }
    }

    write_summary(game.state(), out)
}

fn write_summary(state: &GameState, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", state.board().display())?;
    writeln!(out)?;
    writeln!(out, "{}", score_label(state, Player::X))?;
    writeln!(out, "{}", score_label(state, Player::O))?;
    writeln!(out, "{}", free_squares_label(state))?;

    let message = state.end_of_game_message();
    if message.is_empty() {
        writeln!(out, "{} to move", state.turn())?;
    } else {
        writeln!(out, "{}", message)?;
    }
    Ok(())
}
