//! Command-line interface for morpion.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Morpion - tic-tac-toe for two players at one terminal
#[derive(Parser, Debug)]
#[command(name = "morpion")]
#[command(about = "Tic-tac-toe for two players at one terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML settings file (skipped if missing)
    #[arg(long, global = true, default_value = "morpion.toml")]
    pub config: PathBuf,

    /// Write logs to this file (overrides the settings file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play on the full-screen board (keyboard and mouse)
    Play,

    /// Apply moves without a UI and print the resulting game
    Replay {
        /// Moves as `row,col` pairs, rows and columns counted from 0
        #[arg(value_parser = parse_coords)]
        moves: Vec<(usize, usize)>,
    },
}

/// Parses a `row,col` pair.
pub fn parse_coords(s: &str) -> Result<(usize, usize), String> {
    let (row, column) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got {:?}", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row in {:?}: {}", s, e))?;
    let column = column
        .trim()
        .parse()
        .map_err(|e| format!("invalid column in {:?}: {}", s, e))?;
    Ok((row, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("1,2"), Ok((1, 2)));
        assert_eq!(parse_coords(" 0 , 0 "), Ok((0, 0)));
        assert!(parse_coords("12").is_err());
        assert!(parse_coords("a,1").is_err());
        assert!(parse_coords("1,-1").is_err());
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["morpion"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("morpion.toml"));
    }

    #[test]
    fn test_replay_arguments() {
        let cli = Cli::parse_from(["morpion", "replay", "0,0", "1,1", "--log-file", "x.log"]);
        match cli.command {
            Some(Command::Replay { moves }) => assert_eq!(moves, vec![(0, 0), (1, 1)]),
            other => panic!("Expected replay, got {:?}", other),
        }
        assert_eq!(cli.log_file, Some(PathBuf::from("x.log")));
    }
}
