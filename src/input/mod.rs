//! Input module - raw terminal events to game commands

pub mod handler;

pub use handler::{map_key, GameCommand, SwipeTracker};
