//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L), shuffled. Pieces are
//! drawn until the bag is empty, then a fresh bag is built and shuffled
//! independently of the previous one.
//!
//! The generator is a seeded LCG so that a seed plus an action/tick trace
//! replays the same game.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, bound)`.
    ///
    /// Multiply-shift keeps the high (better mixed) LCG bits; draws landing in
    /// the short final bucket are rejected so every value is equally likely.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let product = u64::from(self.next_u32()) * u64::from(bound);
            if (product as u32) >= threshold {
                return (product >> 32) as u32;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag; 7 means empty
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    ///
    /// The first bag is built lazily on the first draw.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece, refilling the bag when it runs out
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Peek at the next piece without consuming it or the main RNG.
    ///
    /// When the bag is empty this previews the first piece of the next bag
    /// from a copy of the RNG, which matches what `draw` will produce.
    pub fn peek(&self) -> PieceKind {
        if let Some(&kind) = self.bag.get(self.bag_index) {
            return kind;
        }
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Drop the pending bag; the RNG stream continues.
    pub fn clear(&mut self) {
        self.bag_index = self.bag.len();
    }

    /// Seed the queue was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current generator state; advances with every bag.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
