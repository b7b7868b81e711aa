//! Player module - the session's piece and progression state
//!
//! Holds the falling piece, the lookahead piece, the falling piece's position and
//! the score/level/lines counters. It does not check collisions: whether a freshly
//! spawned piece fits is the engine's call.

use crate::board::Board;
use crate::pieces::Piece;
use crate::rng::KindSource;
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_score};
use crate::types::START_LEVEL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    current: Option<Piece>,
    next: Option<Piece>,
    x: i16,
    y: i16,
    score: u32,
    level: u32,
    lines: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            current: None,
            next: None,
            x: 0,
            y: 0,
            score: 0,
            level: START_LEVEL,
            lines: 0,
        }
    }

    /// Back to the state of a fresh session
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Falling piece, `None` before the first spawn
    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Piece> {
        self.current.as_mut()
    }

    /// Lookahead piece
    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Top-left of the falling piece's matrix in board cells
    pub fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i16, y: i16) {
        self.x = x;
        self.y = y;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Make sure a lookahead piece exists.
    pub fn ensure_next(&mut self, source: &mut dyn KindSource) {
        if self.next.is_none() {
            self.next = Some(Piece::new(source.next_kind()));
        }
    }

    /// Promote the lookahead to the falling piece, draw a new lookahead, and place the
    /// piece centered at the top of `board`.
    pub fn spawn_piece(&mut self, board: &Board, source: &mut dyn KindSource) {
        self.ensure_next(source);
        let piece = self.next.take().unwrap_or_else(|| Piece::new(source.next_kind()));
        self.next = Some(Piece::new(source.next_kind()));

        self.x = board.width() / 2 - piece.matrix().cols() / 2;
        self.y = 0;
        self.current = Some(piece);
    }

    /// Gravity period for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Count `n` cleared lines, score them at the current level, and raise the level
    /// if the new total calls for it.
    pub fn add_lines_cleared(&mut self, n: u32) {
        self.lines = self.lines.saturating_add(n);
        self.score = self
            .score
            .saturating_add(line_clear_score(n as usize, self.level));

        let level = level_for_lines(self.lines);
        if level > self.level {
            self.level = level;
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::KindSequence;
    use crate::types::PieceKind;

    #[test]
    fn test_new_player() {
        let player = Player::new();
        assert!(player.current().is_none());
        assert!(player.next().is_none());
        assert_eq!(player.score(), 0);
        assert_eq!(player.level(), 1);
        assert_eq!(player.lines(), 0);
    }

    #[test]
    fn test_spawn_promotes_lookahead() {
        let board = Board::default();
        let mut seq = KindSequence::new(vec![PieceKind::T, PieceKind::I, PieceKind::O]).unwrap();
        let mut player = Player::new();

        player.spawn_piece(&board, &mut seq);
        assert_eq!(player.current().unwrap().kind(), PieceKind::T);
        assert_eq!(player.next().unwrap().kind(), PieceKind::I);

        player.spawn_piece(&board, &mut seq);
        assert_eq!(player.current().unwrap().kind(), PieceKind::I);
        assert_eq!(player.next().unwrap().kind(), PieceKind::O);
        assert_eq!(seq.drawn(), 3);
    }

    #[test]
    fn test_spawn_centers_piece() {
        let board = Board::default();
        let mut player = Player::new();

        let mut seq = KindSequence::new(vec![PieceKind::O]).unwrap();
        player.spawn_piece(&board, &mut seq);
        assert_eq!(player.position(), (5, 0));

        let mut seq = KindSequence::new(vec![PieceKind::I]).unwrap();
        player.reset();
        player.spawn_piece(&board, &mut seq);
        assert_eq!(player.position(), (4, 0));

        let mut seq = KindSequence::new(vec![PieceKind::T]).unwrap();
        player.reset();
        player.spawn_piece(&board, &mut seq);
        assert_eq!(player.position(), (5, 0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let board = Board::default();
        let mut seq = KindSequence::new(vec![PieceKind::L]).unwrap();
        let mut player = Player::new();
        player.spawn_piece(&board, &mut seq);
        player.add_lines_cleared(12);
        player.set_position(3, 9);

        player.reset();
        assert_eq!(player, Player::new());
    }

    #[test]
    fn test_add_lines_scores_at_current_level() {
        let mut player = Player::new();
        player.add_lines_cleared(1);
        assert_eq!(player.score(), 100);
        assert_eq!(player.lines(), 1);
        assert_eq!(player.level(), 1);

        player.add_lines_cleared(4);
        assert_eq!(player.score(), 900);
        assert_eq!(player.lines(), 5);
    }

    #[test]
    fn test_level_up_after_ten_lines() {
        let mut player = Player::new();
        player.add_lines_cleared(4);
        player.add_lines_cleared(4);
        assert_eq!(player.level(), 1);
        // Scored at level 1, then the level rises.
        player.add_lines_cleared(3);
        assert_eq!(player.score(), 800 + 800 + 500);
        assert_eq!(player.level(), 2);
        assert_eq!(player.drop_interval_ms(), 1880);

        player.add_lines_cleared(1);
        assert_eq!(player.score(), 2100 + 200);
    }

    #[test]
    fn test_zero_lines_changes_nothing() {
        let mut player = Player::new();
        player.add_lines_cleared(0);
        assert_eq!(player, Player::new());
    }
}
