//! RNG module - deterministic randomness for food placement
//!
//! A simple LCG (constants from Numerical Recipes) keeps the engine free of
//! external RNG dependencies and makes games reproducible from a seed.

use crate::types::{FoodKind, GridSize, Position};

/// Simple LCG (Linear Congruential Generator) RNG
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
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Sample a uniformly random cell on the grid
    pub fn next_cell(&mut self, grid: GridSize) -> Position {
        let x = self.next_range(grid.width as u32) as i16;
        let y = self.next_range(grid.height as u32) as i16;
        Position::new(x, y)
    }

    /// Pick a food kind uniformly among the four kinds
    pub fn next_food_kind(&mut self) -> FoodKind {
        let idx = self.next_range(FoodKind::ALL.len() as u32) as usize;
        FoodKind::ALL[idx]
    }

    /// Current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
