//! Game state module - the fixed-tick snake engine
//!
//! Ties together snake, food, effects, and RNG behind a small command
//! surface. The engine never reads a clock: callers pass the current time to
//! `tick`, which makes whole games reproducible from a seed and a tick
//! schedule.

use arrayvec::ArrayVec;

use crate::core::{place_food, ActiveEffect, EffectSet, Food, SimpleRng, Snake};
use crate::types::{
    Difficulty, EffectKind, FoodKind, GameStatus, GridSize, Heading, GRID_HEIGHT, GRID_WIDTH,
    MIN_TICK_INTERVAL_MS,
};

/// Events emitted by a single tick, in occurrence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    FoodEaten { kind: FoodKind, value: u32 },
    EffectStarted(EffectKind),
    GameOver { victory: bool },
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake advanced this tick
    pub moved: bool,
    pub events: ArrayVec<TickEvent, 3>,
}

impl TickResult {
    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::GameOver { .. }))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: GridSize,
    snake: Snake,
    food: Option<Food>,
    /// Heading requested since the last tick; committed at the next tick
    /// boundary. Validated against the committed heading, so only the last
    /// valid request before a tick takes effect.
    pending_heading: Option<Heading>,
    effects: EffectSet,
    score: u32,
    status: GameStatus,
    difficulty: Difficulty,
    sound_enabled: bool,
    rng: SimpleRng,
    /// Set when the game ended by filling the board rather than by collision
    victory: bool,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
}

impl GameState {
    /// Create a fresh game on the default grid with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_grid(GridSize::default(), seed)
    }

    pub fn with_grid(grid: GridSize, seed: u32) -> Self {
        // Snapshot cell storage is statically sized for the default board,
        // so larger dimensions are clamped.
        let grid = GridSize::new(grid.width.min(GRID_WIDTH), grid.height.min(GRID_HEIGHT));
        let snake = Snake::spawn(grid);
        let mut rng = SimpleRng::new(seed);
        let food = place_food(grid, &snake, &mut rng);

        Self {
            grid,
            snake,
            food,
            pending_heading: None,
            effects: EffectSet::new(),
            score: 0,
            status: GameStatus::NotStarted,
            difficulty: Difficulty::default(),
            sound_enabled: true,
            rng,
            victory: false,
            episode_id: 0,
        }
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn effects(&self) -> &EffectSet {
        &self.effects
    }

    pub fn victory(&self) -> bool {
        self.victory
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Begin the game. Only valid from the initial state; a finished game
    /// goes through `reset` first.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::NotStarted {
            return false;
        }
        self.status = GameStatus::Running;
        true
    }

    /// Toggle between running and paused. No-op in other states.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                true
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                true
            }
            GameStatus::NotStarted | GameStatus::GameOver => false,
        }
    }

    /// Reinitialize board state for a new episode. Difficulty and sound
    /// settings survive; the RNG sequence continues rather than repeating.
    pub fn reset(&mut self) {
        self.snake = Snake::spawn(self.grid);
        self.food = place_food(self.grid, &self.snake, &mut self.rng);
        self.pending_heading = None;
        self.effects.clear();
        self.score = 0;
        self.status = GameStatus::NotStarted;
        self.victory = false;
        self.episode_id = self.episode_id.wrapping_add(1);
    }

    /// Request a heading change, applied at the next tick.
    ///
    /// Reversals (the opposite of the heading committed at the last tick) are
    /// rejected; so is any request once the game is over. The last valid
    /// request before a tick wins.
    pub fn set_heading(&mut self, heading: Heading) -> bool {
        if self.status == GameStatus::GameOver {
            return false;
        }
        if heading == self.snake.heading().opposite() {
            return false;
        }
        self.pending_heading = Some(heading);
        true
    }

    /// Change the base tick rate. Takes effect from the next scheduling
    /// decision; the current game keeps running.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Milliseconds until the next tick is due, given active effects.
    ///
    /// A factor above 100 shortens the interval (faster game). Clamped below
    /// by [`MIN_TICK_INTERVAL_MS`].
    pub fn effective_interval_ms(&self) -> u64 {
        let base = self.difficulty.base_interval_ms();
        let pct = self.effects.net_factor_pct() as u64;
        (base * 100 / pct).max(MIN_TICK_INTERVAL_MS)
    }

    /// Advance the game by one step. `now_ms` is the engine clock in
    /// milliseconds; it only needs to be monotonic across calls.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let mut result = TickResult::default();

        if self.status != GameStatus::Running {
            return result;
        }

        self.effects.prune(now_ms);

        if let Some(heading) = self.pending_heading.take() {
            // Re-validate: queued before a tick that may have changed the
            // committed heading is impossible here, but a stale request from
            // before a reset would be.
            if heading != self.snake.heading().opposite() {
                self.snake.set_heading(heading);
            }
        }

        let new_head = self.snake.next_head();

        // Wall or body collision ends the game with the state frozen at the
        // last legal position.
        if !self.grid.contains(new_head) || self.snake.occupies(new_head) {
            self.status = GameStatus::GameOver;
            result.events.push(TickEvent::GameOver { victory: false });
            return result;
        }

        let eating = self.food.map_or(false, |f| f.pos == new_head);
        self.snake.advance(new_head, eating);
        result.moved = true;

        if eating {
            // `eating` implies food is present.
            if let Some(food) = self.food.take() {
                self.score += food.value();
                result.events.push(TickEvent::FoodEaten {
                    kind: food.kind,
                    value: food.value(),
                });

                if let Some(kind) = food.effect() {
                    self.effects.push(ActiveEffect::start(kind, now_ms));
                    result.events.push(TickEvent::EffectStarted(kind));
                }
            }

            match place_food(self.grid, &self.snake, &mut self.rng) {
                Some(food) => self.food = Some(food),
                None => {
                    // Board is full: the snake won.
                    self.status = GameStatus::GameOver;
                    self.victory = true;
                    result.events.push(TickEvent::GameOver { victory: true });
                }
            }
        }

        result
    }

    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        out.write_from(self);
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Option<Food>) {
        self.food = food;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn running_game(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.score(), 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.difficulty(), Difficulty::Medium);
        assert!(state.sound_enabled());
        assert!(state.effects().is_empty());
        assert!(state.food().is_some());
        assert!(!state.victory());
    }

    #[test]
    fn test_food_never_on_snake_at_creation() {
        for seed in 1..50 {
            let state = GameState::new(seed);
            let food = state.food().unwrap();
            assert!(!state.snake().occupies(food.pos));
        }
    }

    #[test]
    fn test_start_only_from_initial_state() {
        let mut state = GameState::new(1);
        assert!(state.start());
        assert_eq!(state.status(), GameStatus::Running);

        assert!(!state.start());

        state.toggle_pause();
        assert!(!state.start());
        assert_eq!(state.status(), GameStatus::Paused);
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut state = GameState::new(1);
        let head = state.snake().head();

        let result = state.tick(150);
        assert!(!result.moved);
        assert!(result.events.is_empty());
        assert_eq!(state.snake().head(), head);
    }

    #[test]
    fn test_tick_moves_one_cell() {
        let mut state = running_game(1);
        // Keep the run clear of the initial food.
        state.set_food(Some(Food {
            pos: Position::new(0, 0),
            kind: FoodKind::Normal,
        }));
        let head = state.snake().head();

        let result = state.tick(150);
        assert!(result.moved);
        assert_eq!(state.snake().head(), Position::new(head.x + 1, head.y));
        assert_eq!(state.snake().len(), 3);
    }

    #[test]
    fn test_pause_blocks_ticks() {
        let mut state = running_game(1);
        state.toggle_pause();
        let head = state.snake().head();

        for i in 0..10 {
            let result = state.tick(150 * (i + 1));
            assert!(!result.moved);
        }
        assert_eq!(state.snake().head(), head);

        state.toggle_pause();
        assert!(state.tick(5000).moved);
    }

    #[test]
    fn test_deep_slow_stack_keeps_interval_finite() {
        let mut state = running_game(1);

        // L-shaped walk from the spawn head at (10,10): five cells right,
        // five down, one left, eating a slow food on every step. All eleven
        // effects stay alive because the clock barely advances.
        let mut path: Vec<Position> = (11..=15).map(|x| Position::new(x, 10)).collect();
        path.extend((11..=15).map(|y| Position::new(15, y)));
        path.push(Position::new(14, 15));

        for (i, &pos) in path.iter().enumerate() {
            if pos == Position::new(15, 11) {
                state.set_heading(Heading::Down);
            }
            if pos == Position::new(14, 15) {
                state.set_heading(Heading::Left);
            }
            state.set_food(Some(Food {
                pos,
                kind: FoodKind::Slow,
            }));
            assert!(state.tick(i as u64 + 1).moved);
        }

        assert_eq!(state.effects().len(), 11);
        assert_eq!(state.effects().net_factor_pct(), 1);
        assert_eq!(state.effective_interval_ms(), 150 * 100);
    }

    #[test]
    fn test_heading_buffered_until_tick() {
        let mut state = running_game(1);
        state.set_food(None);
        let head = state.snake().head();

        assert!(state.set_heading(Heading::Up));
        // Heading is not committed until the tick runs.
        assert_eq!(state.snake().heading(), Heading::Right);

        state.tick(150);
        assert_eq!(state.snake().heading(), Heading::Up);
        assert_eq!(state.snake().head(), Position::new(head.x, head.y - 1));
    }

    #[test]
    fn test_reversal_rejected() {
        let mut state = running_game(1);

        // Heading right; a left request must be refused.
        assert!(!state.set_heading(Heading::Left));
        assert!(state.set_heading(Heading::Right));
        assert!(state.set_heading(Heading::Up));
        assert!(state.set_heading(Heading::Down));
    }

    #[test]
    fn test_two_step_reversal_between_ticks_rejected() {
        let mut state = running_game(1);
        state.set_food(None);

        // Up then Left-reversal attempt: both validated against the
        // committed heading (Right), so Left is still a reversal.
        assert!(state.set_heading(Heading::Up));
        assert!(!state.set_heading(Heading::Left));

        state.tick(150);
        assert_eq!(state.snake().heading(), Heading::Up);
    }

    #[test]
    fn test_last_valid_request_wins() {
        let mut state = running_game(1);
        state.set_food(None);

        assert!(state.set_heading(Heading::Up));
        assert!(state.set_heading(Heading::Down));

        state.tick(150);
        assert_eq!(state.snake().heading(), Heading::Down);
    }

    #[test]
    fn test_wall_collision_freezes_state() {
        let mut state = running_game(1);
        state.set_food(None);
        let grid = state.grid();

        // Drive the snake into the right wall.
        let mut last_head = state.snake().head();
        let mut now = 0u64;
        loop {
            now += 150;
            let result = state.tick(now);
            if result.game_over() {
                break;
            }
            last_head = state.snake().head();
        }

        assert_eq!(state.status(), GameStatus::GameOver);
        assert!(!state.victory());
        // The head never left the grid.
        assert_eq!(last_head.x, grid.width as i16 - 1);
        assert_eq!(state.snake().head(), last_head);

        // Terminal state is frozen.
        let score = state.score();
        assert!(!state.tick(now + 150).moved);
        assert!(!state.set_heading(Heading::Up));
        assert!(!state.toggle_pause());
        assert_eq!(state.score(), score);
        assert_eq!(state.snake().head(), last_head);
    }

    #[test]
    fn test_self_collision() {
        let mut state = running_game(1);
        state.set_food(None);
        // A hook shape: stepping up then turning right runs into the body.
        state.set_snake(Snake::from_segments(
            &[
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(6, 3),
            ],
            Heading::Up,
        ));

        let result = state.tick(150);
        assert!(result.moved);

        state.set_heading(Heading::Right);
        let result = state.tick(300);
        assert!(!result.moved);
        assert!(result.game_over());
        assert_eq!(state.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = running_game(1);
        let head = state.snake().head();
        state.set_food(Some(Food {
            pos: Position::new(head.x + 1, head.y),
            kind: FoodKind::Normal,
        }));

        let result = state.tick(150);
        assert!(result.moved);
        assert!(result
            .events
            .contains(&TickEvent::FoodEaten {
                kind: FoodKind::Normal,
                value: 1
            }));
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 4);

        // Replacement food is somewhere legal.
        let food = state.food().unwrap();
        assert!(state.grid().contains(food.pos));
        assert!(!state.snake().occupies(food.pos));
    }

    #[test]
    fn test_speed_food_starts_effect() {
        let mut state = running_game(1);
        let head = state.snake().head();
        state.set_food(Some(Food {
            pos: Position::new(head.x + 1, head.y),
            kind: FoodKind::Speed,
        }));

        let result = state.tick(1000);
        assert!(result
            .events
            .contains(&TickEvent::EffectStarted(EffectKind::Speed)));
        assert_eq!(state.score(), 2);
        assert_eq!(state.effects().len(), 1);

        // 150ms base at 1.5x -> 100ms.
        assert_eq!(state.effective_interval_ms(), 100);

        // Effect lapses exactly 5000ms after it started.
        state.set_food(None);
        state.tick(5999);
        assert_eq!(state.effects().len(), 1);
        state.tick(6000);
        assert!(state.effects().is_empty());
        assert_eq!(state.effective_interval_ms(), 150);
    }

    #[test]
    fn test_effect_composition_in_interval() {
        let mut state = running_game(1);
        state.set_difficulty(Difficulty::Easy);

        // Eat a speed food, then a slow food; both effects stay live.
        let head = state.snake().head();
        state.set_food(Some(Food {
            pos: Position::new(head.x + 1, head.y),
            kind: FoodKind::Speed,
        }));
        state.tick(100);
        let head = state.snake().head();
        state.set_food(Some(Food {
            pos: Position::new(head.x + 1, head.y),
            kind: FoodKind::Slow,
        }));
        state.tick(200);

        assert_eq!(state.effects().net_factor_pct(), 105);
        // 200ms base / 1.05 = 190ms (integer math).
        assert_eq!(state.effective_interval_ms(), 200 * 100 / 105);
    }

    #[test]
    fn test_interval_floor() {
        let mut state = running_game(1);
        state.set_difficulty(Difficulty::Hard);

        // Stack enough speed-ups to push past the floor.
        let mut now = 0u64;
        for _ in 0..4 {
            let head = state.snake().head();
            state.set_food(Some(Food {
                pos: Position::new(head.x + 1, head.y),
                kind: FoodKind::Speed,
            }));
            now += 100;
            state.tick(now);
        }

        // 100 * 100 / 506 = 19, clamped to 30.
        assert_eq!(state.effective_interval_ms(), MIN_TICK_INTERVAL_MS);
    }

    #[test]
    fn test_score_monotonic_within_session() {
        let mut state = running_game(1);
        let mut last_score = 0;
        let mut now = 0u64;

        for _ in 0..30 {
            now += 150;
            // Feed continuously, steering away from walls is not needed for
            // a short run from center.
            let head = state.snake().head();
            let next = Position::new(head.x + 1, head.y);
            if !state.grid().contains(next) {
                break;
            }
            state.set_food(Some(Food {
                pos: next,
                kind: FoodKind::Normal,
            }));
            state.tick(now);
            assert!(state.score() >= last_score);
            last_score = state.score();
        }
        assert!(last_score > 0);
    }

    #[test]
    fn test_reset_preserves_settings() {
        let mut state = running_game(1);
        state.set_difficulty(Difficulty::Hard);
        state.set_sound_enabled(false);
        state.tick(150);
        state.tick(300);

        let episode = state.episode_id();
        state.reset();

        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.score(), 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().heading(), Heading::Right);
        assert!(state.effects().is_empty());
        assert!(!state.victory());
        assert_eq!(state.episode_id(), episode + 1);
        // Settings survive the reset.
        assert_eq!(state.difficulty(), Difficulty::Hard);
        assert!(!state.sound_enabled());
    }

    #[test]
    fn test_reset_after_game_over_allows_restart() {
        let mut state = running_game(1);
        state.set_food(None);
        let mut now = 0u64;
        loop {
            now += 150;
            if state.tick(now).game_over() {
                break;
            }
        }

        state.reset();
        assert!(state.start());
        assert!(state.tick(now + 150).moved);
    }

    #[test]
    fn test_stale_pending_heading_discarded_on_reset() {
        let mut state = running_game(1);
        state.set_food(None);
        state.set_heading(Heading::Up);

        state.reset();
        state.start();
        state.tick(150);
        // The pre-reset request must not leak into the new episode.
        assert_eq!(state.snake().heading(), Heading::Right);
    }

    #[test]
    fn test_victory_on_full_board() {
        let grid = GridSize::new(3, 3);
        let mut state = GameState::with_grid(grid, 1);
        state.start();

        // Snake fills all but one cell; head adjacent to the gap.
        let mut segments = vec![Position::new(1, 0)];
        for p in [
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(2, 2),
            Position::new(1, 2),
            Position::new(0, 2),
        ] {
            segments.push(p);
        }
        state.set_snake(Snake::from_segments(&segments, Heading::Right));
        state.set_food(Some(Food {
            pos: Position::new(2, 0),
            kind: FoodKind::Normal,
        }));

        let result = state.tick(150);
        assert!(result.moved);
        assert!(result.events.contains(&TickEvent::GameOver { victory: true }));
        assert_eq!(state.status(), GameStatus::GameOver);
        assert!(state.victory());
        assert_eq!(state.snake().len(), grid.cell_count());
        assert!(state.food().is_none());
    }

    #[test]
    fn test_difficulty_change_mid_game() {
        let mut state = running_game(1);
        assert_eq!(state.effective_interval_ms(), 150);

        state.set_difficulty(Difficulty::Easy);
        assert_eq!(state.effective_interval_ms(), 200);
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = running_game(777);
        let mut b = running_game(777);

        let mut now = 0u64;
        for i in 0..20 {
            now += 150;
            if i == 5 {
                a.set_heading(Heading::Down);
                b.set_heading(Heading::Down);
            }
            assert_eq!(a.tick(now), b.tick(now));
            assert_eq!(a.snake().head(), b.snake().head());
            assert_eq!(a.food(), b.food());
            assert_eq!(a.score(), b.score());
        }
    }
}
