//! Render scheduling decoupled from the game tick.
//!
//! The engine may tick every 30-200ms while the panel countdowns want
//! smoother updates, and a paused game wants almost none. The gate renders
//! whenever the frame content changed, and otherwise at most once per
//! `static_interval_ms`.

#[derive(Debug, Clone)]
pub struct RenderGate {
    static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderGate {
    pub fn new(static_interval_ms: u64) -> Self {
        Self {
            static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render. `fingerprint` is any hash of the visible
    /// state; a change forces a frame.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        if !self.has_rendered || fingerprint != self.last_fingerprint {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.static_interval_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }
}
