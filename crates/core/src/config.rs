//! Engine configuration
//!
//! Loaded from JSON; every field is optional and falls back to the defaults in
//! `happy_tetris_types`.
//!
//! ```json
//! { "board_width": 12, "board_height": 24, "seed": 7 }
//! ```

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{BoardError, ConfigError};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub board_width: u8,
    pub board_height: u8,
    /// Piece RNG seed; `None` lets the caller pick one
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        self.board().map(|_| ())
    }

    /// Empty board of the configured size
    pub fn board(&self) -> Result<Board, BoardError> {
        Board::new(self.board_width, self.board_height)
    }
}
