//! Audio module - injected sound capability.
//!
//! Gameplay code emits [`SoundEvent`]s to a `SoundPlayer` passed in by the
//! host, so tests and headless runs use [`NullPlayer`] while the terminal
//! front end uses the terminal bell. The engine itself never makes noise.

use std::io::Write;

/// Game moments that may be audible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Eat,
    GameOver,
    Victory,
}

pub trait SoundPlayer {
    fn play(&mut self, event: SoundEvent);
}

/// Silent player for tests and muted sessions
#[derive(Debug, Default)]
pub struct NullPlayer;

impl SoundPlayer for NullPlayer {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Terminal-bell player. Writes BEL for every event; game over rings twice.
#[derive(Debug, Default)]
pub struct BellPlayer;

impl SoundPlayer for BellPlayer {
    fn play(&mut self, event: SoundEvent) {
        let bells: &[u8] = match event {
            SoundEvent::Eat => b"\x07",
            SoundEvent::GameOver => b"\x07\x07",
            SoundEvent::Victory => b"\x07\x07\x07",
        };
        let mut stdout = std::io::stdout();
        // A failed bell is not worth surfacing.
        let _ = stdout.write_all(bells);
        let _ = stdout.flush();
    }
}
