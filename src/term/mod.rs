//! Terminal rendering module.
//!
//! Renders into a simple framebuffer that a terminal backend flushes with
//! diff-based redraws. The view layer is pure so it can be unit-tested; only
//! `TerminalRenderer` touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod throttle;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
pub use throttle::RenderGate;
