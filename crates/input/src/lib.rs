//! Terminal input mapping.
//!
//! Translates `crossterm` key events into engine [`Command`](crate::types::Command)s.
//! There is no key-repeat handling here: the terminal's own auto-repeat arrives as
//! `Repeat` events and each one counts as a press.

pub mod map;

pub use happy_tetris_types as types;

pub use map::{command_for_key, is_help_key, is_press, should_quit};
