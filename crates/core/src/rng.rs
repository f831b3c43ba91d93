//! RNG module - uniform random piece generation
//!
//! Every draw picks one of the seven kinds uniformly and independently of all earlier
//! draws. There is no bag and no anti-repeat rule: the same kind may come up any number
//! of times in a row.
//!
//! A small seeded LCG drives the draws so a session can be replayed from its seed.

use std::sync::Arc;

use crate::pieces::{Piece, PieceCatalog};
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

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current state (a valid seed for an identical continuation)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws pieces with a one-piece lookahead
///
/// The lookahead is drawn eagerly, so [`PieceSource::peek`] is always exactly what the
/// following [`PieceSource::next`] returns.
#[derive(Debug, Clone)]
pub struct PieceSource {
    catalog: PieceCatalog,
    rng: SimpleRng,
    lookahead: PieceKind,
    seed: u32,
}

impl PieceSource {
    /// Create a source with the given seed
    pub fn new(catalog: PieceCatalog, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let lookahead = Self::draw(&mut rng);
        Self {
            catalog,
            rng,
            lookahead,
            seed,
        }
    }

    fn draw(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Take the lookahead piece and draw a fresh one behind it
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Arc<Piece> {
        let kind = self.next_kind();
        self.catalog.create(kind)
    }

    /// Same as [`PieceSource::next`], kind only
    pub fn next_kind(&mut self) -> PieceKind {
        let kind = self.lookahead;
        self.lookahead = Self::draw(&mut self.rng);
        kind
    }

    /// The piece the next call to [`PieceSource::next`] will return
    pub fn peek(&self) -> Arc<Piece> {
        self.catalog.create(self.lookahead)
    }

    pub fn peek_kind(&self) -> PieceKind {
        self.lookahead
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Restart the sequence from `seed`
    pub fn reseed(&mut self, seed: u32) {
        self.rng = SimpleRng::new(seed);
        self.lookahead = Self::draw(&mut self.rng);
        self.seed = seed;
    }
}
