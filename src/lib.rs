//! Happy Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, integration tests
//! and benches can write `happy_tetris::{core,engine,input,term,types}`.

pub use happy_tetris_core as core;
pub use happy_tetris_engine as engine;
pub use happy_tetris_input as input;
pub use happy_tetris_term as term;
pub use happy_tetris_types as types;
