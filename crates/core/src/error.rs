//! Construction-time errors.
//!
//! Gameplay never produces these; a rejected move is a no-op, not an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {width}x{height} is out of range (each side must be {min}..={max})")]
    InvalidDimensions {
        width: u16,
        height: u16,
        min: u8,
        max: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no rows or no columns")]
    Empty,
    #[error("shape is {rows}x{cols}, larger than 4x4")]
    TooLarge { rows: usize, cols: usize },
    #[error("shape rows have different lengths")]
    Ragged,
    #[error("cell value {0} is not a piece kind id")]
    InvalidCell(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("kind sequence needs at least one kind")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
