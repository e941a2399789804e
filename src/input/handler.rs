//! Keyboard and mouse-drag input for terminal environments.
//!
//! Keys map to game commands directly. Mouse drags are classified as swipes
//! on their dominant axis once they pass a distance threshold, mirroring
//! touch controls.

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Difficulty, Heading, SWIPE_THRESHOLD};

/// A command produced from raw input, consumed by the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    SetHeading(Heading),
    Start,
    TogglePause,
    Reset,
    SetDifficulty(Difficulty),
    ToggleSound,
    Quit,
}

/// Map a key press to a command
pub fn map_key(code: KeyCode) -> Option<GameCommand> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameCommand::SetHeading(Heading::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameCommand::SetHeading(Heading::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameCommand::SetHeading(Heading::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameCommand::SetHeading(Heading::Right))
        }
        KeyCode::Enter => Some(GameCommand::Start),
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(GameCommand::TogglePause)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Reset),
        KeyCode::Char('1') => Some(GameCommand::SetDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(GameCommand::SetDifficulty(Difficulty::Medium)),
        KeyCode::Char('3') => Some(GameCommand::SetDifficulty(Difficulty::Hard)),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameCommand::ToggleSound),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameCommand::Quit),
        _ => None,
    }
}

/// Tracks a mouse drag and classifies it as a directional swipe.
///
/// A drag counts as a swipe once its dominant axis moves at least
/// [`SWIPE_THRESHOLD`] cells; the heading follows that axis and sign.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    press: Option<(i32, i32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mouse event; returns a heading when a swipe completes
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Option<Heading> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some((event.column as i32, event.row as i32));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (sx, sy) = self.press.take()?;
                classify_swipe(event.column as i32 - sx, event.row as i32 - sy)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.press = None;
    }
}

fn classify_swipe(dx: i32, dy: i32) -> Option<Heading> {
    if dx.abs() >= dy.abs() {
        if dx.abs() < SWIPE_THRESHOLD {
            return None;
        }
        Some(if dx > 0 { Heading::Right } else { Heading::Left })
    } else {
        if dy.abs() < SWIPE_THRESHOLD {
            return None;
        }
        Some(if dy > 0 { Heading::Down } else { Heading::Up })
    }
}
