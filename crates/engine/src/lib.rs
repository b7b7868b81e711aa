//! Game engine - drives a session over the rules core
//!
//! [`GameEngine`] is the only thing that mutates the board and the player. It is fed
//! by two inputs, both through `&mut self` so they can never interleave:
//!
//! - a clock: [`GameEngine::update`] with a monotonic millisecond timestamp (~every 16ms)
//! - commands: move, soft drop, hard drop, rotate, pause, start
//!
//! Observers [`subscribe`](GameEngine::subscribe) to [`EngineEvent`]s, which are
//! delivered synchronously before the triggering call returns.
//!
//! # Example
//!
//! ```
//! use happy_tetris_core::{Board, KindSequence};
//! use happy_tetris_engine::GameEngine;
//! use happy_tetris_types::{Command, PieceKind, SessionState};
//!
//! let mut engine = GameEngine::with_source(Board::default(), KindSequence::new(vec![PieceKind::O]).unwrap());
//! engine.start();
//! assert_eq!(engine.state(), SessionState::Playing);
//!
//! engine.apply(Command::MoveLeft);
//! engine.apply(Command::HardDrop);
//! assert_eq!(engine.board().get(4, 23), Some(PieceKind::O.id()));
//! ```

pub mod engine;
pub mod events;

pub use happy_tetris_core as core;
pub use happy_tetris_types as types;

pub use engine::GameEngine;
pub use events::ListenerId;
pub use happy_tetris_types::EngineEvent;
