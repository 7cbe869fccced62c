//! Deterministic piece randomization.
//!
//! Spawns draw uniformly from the 7 kinds with repeats permitted - there is
//! no bag or anti-repetition policy. A simple seeded LCG keeps the sequence
//! reproducible for tests and benchmarks.

use crate::types::PieceKind;

/// Linear congruential generator, Numerical Recipes constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG. A zero seed is remapped to avoid the all-zero orbit.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current generator state, usable as a seed to continue the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform sampler over the 7 piece kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSampler {
    rng: SimpleRng,
}

impl PieceSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind.
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32);
        PieceKind::ALL[idx as usize]
    }

    /// Current RNG state (for continuing the sequence across a restart).
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceSampler {
    fn default() -> Self {
        Self::new(1)
    }
}
