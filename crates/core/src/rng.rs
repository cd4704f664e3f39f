//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each of the seven kinds in shuffled order. Pieces are
//! drawn from the bag until it is empty, then a fresh bag is shuffled. Any seven
//! consecutive draws starting at a bag boundary are therefore a permutation of
//! all kinds.
//!
//! The default generator is a seeded `Pcg32`, so equal seeds give equal games.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::PieceKind;

pub const BAG_SIZE: usize = PieceKind::ALL.len();

/// Something the engine can pull the next piece kind from.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Randomizer<R = Pcg32> {
    bag: [PieceKind; BAG_SIZE],
    /// Next index to hand out; `BAG_SIZE` means the bag is empty.
    cursor: usize,
    rng: R,
}

impl Randomizer<Pcg32> {
    /// Seeded PCG generator.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Randomizer<R> {
    /// Wrap an arbitrary generator. The bag starts empty, so the first draw
    /// shuffles.
    pub fn with_rng(rng: R) -> Self {
        Self {
            bag: PieceKind::ALL,
            cursor: BAG_SIZE,
            rng,
        }
    }

    /// Take the next kind, refilling and reshuffling the bag when empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.cursor >= BAG_SIZE {
            self.bag = PieceKind::ALL;
            shuffle(&mut self.rng, &mut self.bag);
            self.cursor = 0;
        }
        let kind = self.bag[self.cursor];
        self.cursor += 1;
        kind
    }

    /// Kinds left before the next reshuffle.
    pub fn remaining_in_bag(&self) -> &[PieceKind] {
        &self.bag[self.cursor..]
    }
}

impl<R: Rng> PieceSource for Randomizer<R> {
    fn next_piece(&mut self) -> PieceKind {
        self.draw()
    }
}

impl<R: Rng> Iterator for Randomizer<R> {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

/// Replays a fixed list of kinds, starting over at the end.
///
/// Useful for deterministic scenarios and recorded games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSequence {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl FixedSequence {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "fixed sequence needs at least one kind");
        Self { kinds, next: 0 }
    }
}

impl PieceSource for FixedSequence {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}
