//! Settings loaded from `morpion.toml`.

use derive_getters::Getters;
use derive_more::{Display, Error};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Frontend settings.
///
/// Every key is optional; missing keys fall back to [`Settings::default`].
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tracing filter used when `RUST_LOG` is unset.
    log_filter: String,

    /// File receiving log output. No file, no logging.
    log_file: Option<PathBuf>,

    /// Board colors.
    colors: ColorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_file: None,
            colors: ColorSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file, or returns defaults if it does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let settings = Self::from_toml(&content)?;
        info!("Config loaded successfully");
        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Replaces the log file, e.g. from a command-line flag.
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self
    }
}

/// Color names as written in the config file.
///
/// Accepts anything ratatui parses as a [`Color`]: names such as `green`
/// or `lightblue`, 256-color indices, or `#rrggbb`.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Foreground of X marks.
    x: String,
    /// Foreground of O marks.
    o: String,
    /// Background of a hovered square that can be played.
    legal: String,
    /// Background of occupied squares while the game runs.
    occupied: String,
    /// Background of the winning line.
    winning: String,
    /// Highlight of the score line of the player to move.
    turn: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            x: "blue".to_string(),
            o: "magenta".to_string(),
            legal: "green".to_string(),
            occupied: "red".to_string(),
            winning: "yellow".to_string(),
            turn: "cyan".to_string(),
        }
    }
}

/// Parsed board colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Foreground of X marks.
    pub x: Color,
    /// Foreground of O marks.
    pub o: Color,
    /// Background of a hovered legal square.
    pub legal: Color,
    /// Background of occupied squares.
    pub occupied: Color,
    /// Background of the winning line.
    pub winning: Color,
    /// Highlight of the player to move.
    pub turn: Color,
}

impl Palette {
    /// Parses every color name, failing on the first unknown one.
    #[instrument(skip(colors))]
    pub fn from_settings(colors: &ColorSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            x: parse_color("x", colors.x())?,
            o: parse_color("o", colors.o())?,
            legal: parse_color("legal", colors.legal())?,
            occupied: parse_color("occupied", colors.occupied())?,
            winning: parse_color("winning", colors.winning())?,
            turn: parse_color("turn", colors.turn())?,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            x: Color::Blue,
            o: Color::Magenta,
            legal: Color::Green,
            occupied: Color::Red,
            winning: Color::Yellow,
            turn: Color::Cyan,
        }
    }
}

#[track_caller]
fn parse_color(key: &str, value: &str) -> Result<Color, ConfigError> {
    match Color::from_str(value) {
        Ok(color) => Ok(color),
        Err(_) => Err(ConfigError::new(format!(
            "Invalid color for colors.{}: {:?}",
            key, value
        ))),
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
