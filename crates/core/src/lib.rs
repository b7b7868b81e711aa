//! Rules core - pure, deterministic, and testable
//!
//! Everything the engine needs to decide what happens on the playfield lives here:
//! the piece catalog, the board grid, the player's session numbers and the
//! scoring/speed laws. There is no notion of time, input or rendering in this crate;
//! the engine crate drives these pieces.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shape matrices and clockwise rotation
//! - [`board`]: the cell grid with collision, merge and line clearing
//! - [`player`]: current/next piece, position, score, level and lines
//! - [`rng`]: injectable piece-kind sources (seeded LCG, fixed sequences)
//! - [`scoring`]: line score, level and gravity laws
//! - [`snapshot`]: owned, read-only views handed to renderers
//! - [`config`]: engine configuration (board size, seed)
//!
//! # Example
//!
//! ```
//! use happy_tetris_core::{Board, Piece, Player, KindSequence};
//! use happy_tetris_types::PieceKind;
//!
//! let board = Board::default();
//! let mut source = KindSequence::new(vec![PieceKind::O]).unwrap();
//! let mut player = Player::new();
//! player.spawn_piece(&board, &mut source);
//!
//! assert_eq!(player.position(), (5, 0));
//! assert!(!board.collides(player.current().unwrap().matrix(), 5, 0));
//! assert_eq!(player.drop_interval_ms(), 2000);
//! # let _ = Piece::new(PieceKind::T);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use happy_tetris_types as types;

pub use board::{Board, Grid};
pub use config::EngineConfig;
pub use error::{BoardError, ConfigError, SequenceError, ShapeError};
pub use pieces::{Matrix, Piece};
pub use player::Player;
pub use rng::{KindSequence, KindSource, SimpleRng};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
