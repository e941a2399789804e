//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default grid dimensions (cells)
pub const GRID_WIDTH: u8 = 20;
pub const GRID_HEIGHT: u8 = 20;

/// Initial snake length at (re)start
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Base tick intervals per difficulty (milliseconds between ticks)
pub const EASY_INTERVAL_MS: u64 = 200;
pub const MEDIUM_INTERVAL_MS: u64 = 150;
pub const HARD_INTERVAL_MS: u64 = 100;

/// Floor for the effective tick interval once speed effects compose
pub const MIN_TICK_INTERVAL_MS: u64 = 30;

/// Speed-modifier parameters (factors as integer percent)
pub const SPEED_FACTOR_PCT: u32 = 150;
pub const SLOW_FACTOR_PCT: u32 = 70;
pub const EFFECT_DURATION_MS: u64 = 5000;

/// Food point values
pub const NORMAL_FOOD_VALUE: u32 = 1;
pub const SPEED_FOOD_VALUE: u32 = 2;
pub const SLOW_FOOD_VALUE: u32 = 2;
pub const BONUS_FOOD_VALUE: u32 = 5;

/// Dominant-axis drag distance that classifies as a swipe
pub const SWIPE_THRESHOLD: i32 = 30;

/// Maximum number of persisted high-score entries
pub const HIGH_SCORE_CAP: usize = 10;

/// A single grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in the given heading
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u8,
    pub height: u8,
}

impl GridSize {
    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i16 && pos.y >= 0 && pos.y < self.height as i16
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Position {
        Position::new(self.width as i16 / 2, self.height as i16 / 2)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

/// Movement direction of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Unit vector for this heading (y grows downward)
    pub fn delta(self) -> (i16, i16) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// The 180-degree reverse of this heading
    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
        }
    }
}

/// Food classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Normal,
    Speed,
    Slow,
    Bonus,
}

impl FoodKind {
    /// All kinds, in sampling order
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Normal,
        FoodKind::Speed,
        FoodKind::Slow,
        FoodKind::Bonus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FoodKind::Normal => "normal",
            FoodKind::Speed => "speed",
            FoodKind::Slow => "slow",
            FoodKind::Bonus => "bonus",
        }
    }
}

/// Kind of an active speed modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Speed,
    Slow,
}

/// Game lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Difficulty selects the base tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Base milliseconds between ticks for this difficulty
    pub fn base_interval_ms(self) -> u64 {
        match self {
            Difficulty::Easy => EASY_INTERVAL_MS,
            Difficulty::Medium => MEDIUM_INTERVAL_MS,
            Difficulty::Hard => HARD_INTERVAL_MS,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_opposites_pair_up() {
        for h in [Heading::Up, Heading::Down, Heading::Left, Heading::Right] {
            assert_eq!(h.opposite().opposite(), h);
            assert_ne!(h.opposite(), h);
        }
    }

    #[test]
    fn test_position_step() {
        let p = Position::new(5, 5);
        assert_eq!(p.step(Heading::Up), Position::new(5, 4));
        assert_eq!(p.step(Heading::Down), Position::new(5, 6));
        assert_eq!(p.step(Heading::Left), Position::new(4, 5));
        assert_eq!(p.step(Heading::Right), Position::new(6, 5));
    }

    #[test]
    fn test_grid_contains() {
        let grid = GridSize::new(20, 20);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 19)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(20, 0)));
        assert!(!grid.contains(Position::new(0, 20)));
    }

    #[test]
    fn test_difficulty_intervals() {
        assert_eq!(Difficulty::Easy.base_interval_ms(), 200);
        assert_eq!(Difficulty::Medium.base_interval_ms(), 150);
        assert_eq!(Difficulty::Hard.base_interval_ms(), 100);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("Easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nope"), None);
    }
}
