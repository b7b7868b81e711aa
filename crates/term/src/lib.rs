//! Terminal front-end.
//!
//! Draws into a plain framebuffer of styled cells (no widget toolkit) and flushes it
//! with crossterm, writing only what changed since the previous frame. Board cells are
//! two columns wide to make up for the terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use happy_tetris_core as core;
pub use happy_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
