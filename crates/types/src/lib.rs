//! Shared types and constants
//!
//! Plain data shared by the rules core, the engine and the terminal front-end.
//! Nothing in here knows about a board instance or about the terminal.
//!
//! # Board Dimensions
//!
//! Default playfield:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 24 rows (indexed 0-23, row 0 at the top)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal clock tick (~60 Hz) |
//! | `BASE_DROP_MS` | 2000 | Gravity period at level 1 |
//! | `DROP_STEP_MS` | 120 | Gravity speed-up per level |
//! | `DROP_INTERVAL_FLOOR_MS` | 800 | Fastest gravity period |
//!
//! Level 11 and above all fall at 800ms per row.
//!
//! # Examples
//!
//! ```
//! use happy_tetris_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind: PieceKind = "t".parse().unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.id(), 7);
//! assert_eq!(PieceKind::from_id(7), Some(PieceKind::T));
//!
//! let cmd: Command = "hardDrop".parse().unwrap();
//! assert_eq!(cmd, Command::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 24);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board width in cells
pub const BOARD_WIDTH: u8 = 12;

/// Default board height in cells
pub const BOARD_HEIGHT: u8 = 24;

/// Nominal clock tick in milliseconds
pub const TICK_MS: u32 = 16;

/// Gravity period at level 1
pub const BASE_DROP_MS: u32 = 2000;

/// Gravity period reduction per level above 1
pub const DROP_STEP_MS: u32 = 120;

/// Gravity period never drops below this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 800;

/// Base points for clearing N lines at once, multiplied by the current level.
///
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level of a fresh session
pub const START_LEVEL: u32 = 1;

/// A board cell: `EMPTY` or a piece-kind id (`1..=7`).
///
/// The id doubles as the color key for renderers.
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Construction-time errors for piece kinds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindError {
    #[error("unknown piece kind id {0} (expected 1..=7)")]
    UnknownId(u8),
    #[error("unknown piece kind name {0:?}")]
    UnknownName(String),
}

/// The seven piece kinds.
///
/// Declaration order is the catalog order; `id()` is the 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    L,
    J,
    O,
    Z,
    S,
    T,
}

impl PieceKind {
    /// Every kind in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Cell value written into the board for this kind
    pub fn id(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::O => 4,
            PieceKind::Z => 5,
            PieceKind::S => 6,
            PieceKind::T => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. `None` for `EMPTY` and unknown ids.
    pub fn from_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Like [`PieceKind::from_id`] but reports why.
    pub fn try_from_id(id: Cell) -> Result<Self, KindError> {
        Self::from_id(id).ok_or(KindError::UnknownId(id))
    }

    /// Display color as RGB
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0xc4, 0x1e, 0x3a),
            PieceKind::L => (0xff, 0xd7, 0x00),
            PieceKind::J => (0xff, 0x6b, 0x35),
            PieceKind::O => (0xff, 0xcc, 0x00),
            PieceKind::Z => (0x8b, 0x00, 0x00),
            PieceKind::S => (0xff, 0xf8, 0xe7),
            PieceKind::T => (0x00, 0xa8, 0x6b),
        }
    }

    /// Lowercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
        }
    }
}

impl FromStr for PieceKind {
    type Err = KindError;

    /// Case-insensitive single-letter name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Ok(PieceKind::I),
            "l" => Ok(PieceKind::L),
            "j" => Ok(PieceKind::J),
            "o" => Ok(PieceKind::O),
            "z" => Ok(PieceKind::Z),
            "s" => Ok(PieceKind::S),
            "t" => Ok(PieceKind::T),
            _ => Err(KindError::UnknownName(s.to_string())),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete player commands accepted by the engine.
///
/// Every command is safe to issue in every session state; disallowed ones are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    TogglePause,
    Start,
}

impl Command {
    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Rotate => "rotate",
            Command::TogglePause => "togglePause",
            Command::Start => "start",
        }
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse a command name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "moveleft" => Ok(Command::MoveLeft),
            "moveright" => Ok(Command::MoveRight),
            "softdrop" => Ok(Command::SoftDrop),
            "harddrop" => Ok(Command::HardDrop),
            "rotate" => Ok(Command::Rotate),
            "togglepause" | "pause" => Ok(Command::TogglePause),
            "start" | "restart" => Ok(Command::Start),
            _ => Err(CommandParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command {0:?}")]
pub struct CommandParseError(pub String);

/// Session lifecycle.
///
/// `Idle` is before the first `start()`. `GameOver` is terminal until the next `start()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::GameOver => "game_over",
        }
    }
}

/// Notifications raised by the engine.
///
/// Delivered synchronously, in order, before the call that caused them returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEvent {
    /// Board or piece changed; a redraw is due.
    StateChanged,
    ScoreChanged,
    /// Number of rows removed by a single lock.
    LinesCleared(u32),
    LevelUp,
    GameOver,
}
