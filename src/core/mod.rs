//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, persistence, or I/O.

pub mod effects;
pub mod food;
pub mod game_state;
pub mod rng;
pub mod snake;
pub mod snapshot;

// Re-export commonly used types
pub use effects::{ActiveEffect, EffectSet};
pub use food::{food_effect, food_value, place_food, Food};
pub use game_state::{GameState, TickEvent, TickResult};
pub use rng::SimpleRng;
pub use snake::Snake;
pub use snapshot::GameSnapshot;
