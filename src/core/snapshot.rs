//! Read-only view of the game state handed to renderers

use arrayvec::ArrayVec;

use crate::core::GameState;
use crate::types::{
    Difficulty, EffectKind, FoodKind, GameStatus, GridSize, Position, GRID_HEIGHT, GRID_WIDTH,
};

pub const CELL_EMPTY: u8 = 0;
pub const CELL_BODY: u8 = 1;
pub const CELL_HEAD: u8 = 2;
pub const CELL_FOOD_NORMAL: u8 = 3;
pub const CELL_FOOD_SPEED: u8 = 4;
pub const CELL_FOOD_SLOW: u8 = 5;
pub const CELL_FOOD_BONUS: u8 = 6;

fn food_cell(kind: FoodKind) -> u8 {
    match kind {
        FoodKind::Normal => CELL_FOOD_NORMAL,
        FoodKind::Speed => CELL_FOOD_SPEED,
        FoodKind::Slow => CELL_FOOD_SLOW,
        FoodKind::Bonus => CELL_FOOD_BONUS,
    }
}

/// An active effect as shown in the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSnapshot {
    pub kind: EffectKind,
    pub expires_at_ms: u64,
}

/// Everything a renderer needs, decoupled from engine internals.
///
/// The cell grid is sized for the maximum supported board; `grid` carries the
/// live dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub cells: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub grid: GridSize,
    pub head: Position,
    pub snake_len: usize,
    pub score: u32,
    pub status: GameStatus,
    pub difficulty: Difficulty,
    pub sound_enabled: bool,
    pub victory: bool,
    pub speed_pct: u32,
    pub effects: ArrayVec<EffectSnapshot, 16>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[CELL_EMPTY; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.grid = GridSize::default();
        self.head = Position::new(0, 0);
        self.snake_len = 0;
        self.score = 0;
        self.status = GameStatus::NotStarted;
        self.difficulty = Difficulty::default();
        self.sound_enabled = true;
        self.victory = false;
        self.speed_pct = 100;
        self.effects.clear();
    }

    pub(crate) fn write_from(&mut self, state: &GameState) {
        self.clear();

        self.grid = state.grid();
        self.head = state.snake().head();
        self.snake_len = state.snake().len();
        self.score = state.score();
        self.status = state.status();
        self.difficulty = state.difficulty();
        self.sound_enabled = state.sound_enabled();
        self.victory = state.victory();
        self.speed_pct = state.effects().net_factor_pct();

        for seg in state.snake().segments() {
            if self.grid.contains(seg) {
                self.cells[seg.y as usize][seg.x as usize] = CELL_BODY;
            }
        }
        let head = state.snake().head();
        if self.grid.contains(head) {
            self.cells[head.y as usize][head.x as usize] = CELL_HEAD;
        }

        if let Some(food) = state.food() {
            if self.grid.contains(food.pos) {
                self.cells[food.pos.y as usize][food.pos.x as usize] = food_cell(food.kind);
            }
        }

        for effect in state.effects().iter() {
            let _ = self.effects.try_push(EffectSnapshot {
                kind: effect.kind,
                expires_at_ms: effect.expires_at_ms,
            });
        }
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[CELL_EMPTY; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            grid: GridSize::default(),
            head: Position::new(0, 0),
            snake_len: 0,
            score: 0,
            status: GameStatus::NotStarted,
            difficulty: Difficulty::default(),
            sound_enabled: true,
            victory: false,
            speed_pct: 100,
            effects: ArrayVec::new(),
        }
    }
}
