//! Morpion - terminal tic-tac-toe
//!
//! Two players share the keyboard and mouse. The game model lives in
//! `morpion_model`; this binary only reads its state and forwards input.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod input;
mod replay;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Command};
use config::{Palette, Settings};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
};
use ratatui::DefaultTerminal;
use std::{fs::File, io, sync::Mutex};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?.with_log_file(cli.log_file);
    init_tracing(&settings)?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_tui(&settings),
        Command::Replay { moves } => replay::run_replay(&moves, &mut io::stdout().lock()),
    }
}

/// Sends logs to the configured file; stdout belongs to the board.
fn init_tracing(settings: &Settings) -> Result<()> {
    let Some(path) = settings.log_file() else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the full-screen board until the user quits.
#[instrument(skip_all)]
fn run_tui(settings: &Settings) -> Result<()> {
    let palette = Palette::from_settings(settings.colors())?;

    info!("Starting Morpion TUI");
    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .map_err(anyhow::Error::from)
        .and_then(|()| run_app(&mut terminal, App::new(palette)));

    // Restore the terminal before any error reaches the user.
    let disabled = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    info!("Morpion TUI stopped");

    result?;
    disabled?;
    Ok(())
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
    Ok(())
}
