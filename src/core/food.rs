//! Food module - food kinds, values, and placement
//!
//! Placement uses rejection sampling against the snake body with a bounded
//! retry count, then falls back to scanning the grid for any free cell. A
//! `None` result means the board is full.

use crate::core::{Snake, SimpleRng};
use crate::types::{
    EffectKind, FoodKind, GridSize, Position, BONUS_FOOD_VALUE, NORMAL_FOOD_VALUE,
    SLOW_FOOD_VALUE, SPEED_FOOD_VALUE,
};

/// Rejection-sampling attempts before falling back to a grid scan
const PLACEMENT_ATTEMPTS: usize = 512;

/// A piece of food on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub pos: Position,
    pub kind: FoodKind,
}

impl Food {
    /// Points awarded when this food is eaten
    pub fn value(&self) -> u32 {
        food_value(self.kind)
    }

    /// Speed modifier triggered by this food, if any
    pub fn effect(&self) -> Option<EffectKind> {
        food_effect(self.kind)
    }
}

pub fn food_value(kind: FoodKind) -> u32 {
    match kind {
        FoodKind::Normal => NORMAL_FOOD_VALUE,
        FoodKind::Speed => SPEED_FOOD_VALUE,
        FoodKind::Slow => SLOW_FOOD_VALUE,
        FoodKind::Bonus => BONUS_FOOD_VALUE,
    }
}

pub fn food_effect(kind: FoodKind) -> Option<EffectKind> {
    match kind {
        FoodKind::Speed => Some(EffectKind::Speed),
        FoodKind::Slow => Some(EffectKind::Slow),
        FoodKind::Normal | FoodKind::Bonus => None,
    }
}

/// Place a new food on a cell not occupied by the snake.
///
/// Returns `None` when every cell is occupied.
pub fn place_food(grid: GridSize, snake: &Snake, rng: &mut SimpleRng) -> Option<Food> {
    let kind = rng.next_food_kind();

    if snake.len() >= grid.cell_count() {
        return None;
    }

    for _ in 0..PLACEMENT_ATTEMPTS {
        let pos = rng.next_cell(grid);
        if !snake.occupies(pos) {
            return Some(Food { pos, kind });
        }
    }

    // Dense board: scan for a free cell starting from a random offset so the
    // fallback does not bias toward the top-left corner.
    let total = grid.cell_count();
    let start = rng.next_range(total as u32) as usize;
    for i in 0..total {
        let idx = (start + i) % total;
        let pos = Position::new(
            (idx % grid.width as usize) as i16,
            (idx / grid.width as usize) as i16,
        );
        if !snake.occupies(pos) {
            return Some(Food { pos, kind });
        }
    }

    None
}
