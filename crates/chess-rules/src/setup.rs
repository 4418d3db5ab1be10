//! Starting-position configuration loaded from TOML.
//!
//! ```toml
//! fen = "7k/5Q2/6K1/8/8/8/8/8"
//! turn = "black"
//! ```
//!
//! Both fields are optional. A missing `fen` means the standard starting
//! position; `turn` overrides the active color carried by the FEN.

use crate::{Board, Game};
use chess_core::{Color, FenError, FenParser};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or applying a game setup.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Failed to read the setup file from disk.
    #[error("failed to read setup file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the setup as valid TOML.
    #[error("failed to parse setup: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to write the setup as TOML.
    #[error("failed to serialize setup: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The `fen` field is not valid placement notation.
    #[error("invalid position: {0}")]
    Fen(#[from] FenError),
}

/// Describes the position a game starts from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameSetup {
    /// FEN placement with an optional active color.
    /// Defaults to the standard starting position.
    #[serde(default = "default_fen")]
    pub fen: String,
    /// Side to move, overriding the FEN's active color when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<Color>,
}

fn default_fen() -> String {
    FenParser::STARTPOS.to_string()
}

impl Default for GameSetup {
    fn default() -> Self {
        GameSetup {
            fen: default_fen(),
            turn: None,
        }
    }
}

impl GameSetup {
    /// Parses a setup from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SetupError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a setup file.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Read`] if the file cannot be read, or
    /// [`SetupError::Parse`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let setup = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), fen = %setup.fen, "loaded game setup");
        Ok(setup)
    }

    /// Captures the current position of `game`. Move history is not kept.
    pub fn from_game(game: &Game) -> Self {
        let fen = FenParser {
            piece_placement: game.board().to_fen(),
            active_color: game.turn(),
        };
        GameSetup {
            fen: fen.to_fen(),
            turn: None,
        }
    }

    /// Builds a fresh game from this setup.
    pub fn to_game(&self) -> Result<Game, SetupError> {
        let parsed = FenParser::parse(&self.fen)?;
        let turn = self.turn.unwrap_or(parsed.active_color);
        Ok(Game::from_board(Board::from(&parsed), turn))
    }

    /// Serializes this setup as TOML.
    pub fn to_toml(&self) -> Result<String, SetupError> {
        Ok(toml::to_string(self)?)
    }
}
