//! Snapshot module - owned copies of engine state for readers
//!
//! Renderers get these instead of references into the engine; writing into a
//! snapshot never reaches the board or the player.

use crate::board::Grid;
use crate::pieces::{Matrix, Piece};
use crate::types::{PieceKind, SessionState, START_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i16,
    pub y: i16,
}

impl ActiveSnapshot {
    pub fn new(piece: &Piece, (x, y): (i16, i16)) -> Self {
        Self {
            kind: piece.kind(),
            matrix: piece.matrix().clone(),
            x,
            y,
        }
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16, u8)> + '_ {
        self.matrix
            .occupied()
            .map(move |(mx, my, cell)| (self.x + mx, self.y + my, cell))
    }
}

/// Everything a renderer needs for one frame, detached from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on
    pub ghost_y: Option<i16>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub state: SessionState,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            active: None,
            ghost_y: None,
            next: None,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            state: SessionState::Idle,
        }
    }
}
