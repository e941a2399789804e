//! Terminal Snake with a deterministic fixed-tick engine.
//!
//! `core` holds the pure game rules; `term`, `input`, `store`, and `audio`
//! are the host-facing layers around it.

pub mod audio;
pub mod core;
pub mod input;
pub mod store;
pub mod term;
pub mod types;
