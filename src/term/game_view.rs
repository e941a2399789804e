//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::{
    GameSnapshot, CELL_BODY, CELL_FOOD_BONUS, CELL_FOOD_NORMAL, CELL_FOOD_SLOW, CELL_FOOD_SPEED,
    CELL_HEAD,
};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{EffectKind, GameStatus};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the snake board, side panel, and status overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell compensates for terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

const BG: Rgb = Rgb::new(25, 25, 35);

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w }
    }

    /// Render a snapshot into `fb`. `now_ms` drives effect countdowns;
    /// `high_score` is the persisted best shown in the panel.
    pub fn render_into(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        high_score: u32,
        now_ms: u64,
        viewport: Viewport,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let board_w = snap.grid.width as u16 * self.cell_w;
        let board_h = snap.grid.height as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + PANEL_WIDTH) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::default().on(BG),
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for y in 0..snap.grid.height as u16 {
            for x in 0..snap.grid.width as u16 {
                let code = snap.cells[y as usize][x as usize];
                if let Some((ch, style)) = cell_glyph(code) {
                    let px = start_x + 1 + x * self.cell_w;
                    fb.fill_rect(px, start_y + 1 + y, self.cell_w, 1, ch, style);
                }
            }
        }

        self.draw_side_panel(fb, snap, high_score, now_ms, start_x + frame_w + 2, start_y);

        match snap.status {
            GameStatus::NotStarted => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER")
            }
            GameStatus::Paused => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "PAUSED")
            }
            GameStatus::GameOver => {
                let text = if snap.victory { "YOU WIN" } else { "GAME OVER" };
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, text);
            }
            GameStatus::Running => {}
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::fg(Rgb::new(200, 200, 200));
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        high_score: u32,
        now_ms: u64,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= fb.width() {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = CellStyle::fg(Rgb::new(120, 120, 130));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_str(panel_x + 7, y, &format!("{}", snap.score), value);
        y += 1;
        fb.put_str(panel_x, y, "BEST", label);
        fb.put_str(panel_x + 7, y, &format!("{}", high_score), value);
        y += 2;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_str(panel_x + 7, y, snap.difficulty.as_str(), value);
        y += 1;
        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_str(panel_x + 7, y, &format!("{}%", snap.speed_pct), value);
        y += 1;
        fb.put_str(panel_x, y, "SOUND", label);
        fb.put_str(
            panel_x + 7,
            y,
            if snap.sound_enabled { "on" } else { "off" },
            value,
        );
        y += 2;

        for effect in &snap.effects {
            let remaining = effect.expires_at_ms.saturating_sub(now_ms);
            let (name, style) = match effect.kind {
                EffectKind::Speed => ("speed+", CellStyle::fg(Rgb::new(240, 200, 80))),
                EffectKind::Slow => ("slow-", CellStyle::fg(Rgb::new(100, 160, 240))),
            };
            fb.put_str(panel_x, y, name, style);
            fb.put_str(
                panel_x + 7,
                y,
                &format!("{:.1}s", remaining as f64 / 1000.0),
                dim,
            );
            y += 1;
        }

        y += 1;
        for line in [
            "arrows/wasd move",
            "space  pause",
            "enter  start",
            "r      restart",
            "1/2/3  difficulty",
            "m      sound",
            "q      quit",
        ] {
            if y >= fb.height() {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
        let mid_y = y + h / 2;
        let text_w = text.chars().count() as u16;
        let tx = x + w.saturating_sub(text_w) / 2;
        fb.put_str(tx, mid_y, text, CellStyle::default().bold().on(BG));
    }
}

const PANEL_WIDTH: u16 = 20;

fn cell_glyph(code: u8) -> Option<(char, CellStyle)> {
    let style = match code {
        CELL_HEAD => CellStyle::fg(Rgb::new(120, 240, 120)).on(BG).bold(),
        CELL_BODY => CellStyle::fg(Rgb::new(80, 190, 90)).on(BG),
        CELL_FOOD_NORMAL => CellStyle::fg(Rgb::new(230, 80, 80)).on(BG),
        CELL_FOOD_SPEED => CellStyle::fg(Rgb::new(240, 200, 80)).on(BG).bold(),
        CELL_FOOD_SLOW => CellStyle::fg(Rgb::new(100, 160, 240)).on(BG),
        CELL_FOOD_BONUS => CellStyle::fg(Rgb::new(220, 120, 220)).on(BG).bold(),
        _ => return None,
    };
    let ch = match code {
        CELL_HEAD | CELL_BODY => '█',
        CELL_FOOD_NORMAL => '●',
        CELL_FOOD_SPEED => '▲',
        CELL_FOOD_SLOW => '▼',
        CELL_FOOD_BONUS => '★',
        _ => return None,
    };
    Some((ch, style))
}
