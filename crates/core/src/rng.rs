//! RNG module - piece-kind sources
//!
//! The engine asks a [`KindSource`] for every new piece. Each draw is independent
//! and uniform over the seven kinds; there is no bag.
//!
//! - [`SimpleRng`]: seeded LCG, deterministic per seed
//! - [`KindSequence`]: replays a fixed list, for tests and scripted demos

use crate::error::SequenceError;
use crate::types::PieceKind;

/// Supplies the kind of each newly generated piece.
pub trait KindSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<T: KindSource + ?Sized> KindSource for &mut T {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

impl<T: KindSource + ?Sized> KindSource for Box<T> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// 32-bit linear congruential generator (a = 1664525, c = 1013904223).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is remapped to 1.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`.
    ///
    /// Scales by the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current state, usable as a seed to resume the same sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl KindSource for SimpleRng {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Cycles through a fixed list of kinds.
#[derive(Debug, Clone)]
pub struct KindSequence {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl KindSequence {
    /// Cycle through `kinds` in order; the list must not be empty.
    pub fn new(kinds: Vec<PieceKind>) -> Result<Self, SequenceError> {
        if kinds.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self { kinds, pos: 0 })
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl KindSource for KindSequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos += 1;
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_kinds_roughly_uniform() {
        let mut rng = SimpleRng::new(42);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            counts[(rng.next_kind().id() - 1) as usize] += 1;
        }
        for (i, &n) in counts.iter().enumerate() {
            assert!((700..=1300).contains(&n), "kind {i} drawn {n} times");
        }
    }

    #[test]
    fn test_draws_are_independent_not_bagged() {
        // A 7-bag never repeats a kind more than twice in a row; independent draws do.
        let mut rng = SimpleRng::new(99);
        let mut prev = rng.next_kind();
        let mut run = 1;
        let mut longest = 1;
        for _ in 0..5000 {
            let k = rng.next_kind();
            if k == prev {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 1;
            }
            prev = k;
        }
        assert!(longest >= 3);
    }

    #[test]
    fn test_sequence_cycles() {
        let mut seq = KindSequence::new(vec![PieceKind::O, PieceKind::T]).unwrap();
        assert_eq!(seq.next_kind(), PieceKind::O);
        assert_eq!(seq.next_kind(), PieceKind::T);
        assert_eq!(seq.next_kind(), PieceKind::O);
        assert_eq!(seq.drawn(), 3);
    }

    #[test]
    fn test_sequence_rejects_empty_list() {
        assert_eq!(KindSequence::new(Vec::new()).err(), Some(SequenceError::Empty));
    }

    #[test]
    fn test_source_through_mut_ref() {
        fn draw(mut source: impl KindSource) -> PieceKind {
            source.next_kind()
        }
        let mut seq = KindSequence::new(vec![PieceKind::S]).unwrap();
        assert_eq!(draw(&mut seq), PieceKind::S);
        assert_eq!(seq.drawn(), 1);
    }
}
