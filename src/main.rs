//! Terminal Snake runner.
//!
//! Hosts the engine behind a crossterm event loop: input is polled with a
//! deadline derived from the engine's effective tick interval, so the game
//! speeds up and slows down with difficulty and active effects. Rendering is
//! gated separately from ticking.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_snake::audio::{BellPlayer, NullPlayer, SoundEvent, SoundPlayer};
use tui_snake::core::{GameState, TickEvent};
use tui_snake::input::{map_key, GameCommand, SwipeTracker};
use tui_snake::store::{default_data_dir, HighScoreStore, SettingsStore};
use tui_snake::term::{FrameBuffer, GameView, RenderGate, TerminalRenderer, Viewport};
use tui_snake::types::GameStatus;

/// Render cadence while nothing on screen changes (panel countdowns)
const STATIC_RENDER_INTERVAL_MS: u64 = 100;

/// Poll ceiling so quit and resize stay responsive while idle or paused
const MAX_POLL_MS: u64 = 50;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn data_file(name: &str) -> PathBuf {
    default_data_dir()
        .unwrap_or_else(|| PathBuf::from(".tui-snake"))
        .join(name)
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut settings_store = SettingsStore::load(data_file("settings.json"));
    let mut score_store = HighScoreStore::load(data_file("scores.json"));

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut state = GameState::new(seed);
    let settings = settings_store.settings();
    state.set_difficulty(settings.difficulty);
    state.set_sound_enabled(settings.sound_enabled);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut gate = RenderGate::new(STATIC_RENDER_INTERVAL_MS);
    let mut swipes = SwipeTracker::new();
    let mut bell = BellPlayer;
    let mut null = NullPlayer;

    let epoch = Instant::now();
    let mut next_tick_at: Option<u64> = None;
    let mut score_recorded = false;

    loop {
        let now_ms = epoch.elapsed().as_millis() as u64;

        // Render when the frame would differ, or periodically for countdowns.
        if gate.should_render(now_ms, frame_fingerprint(&state, now_ms)) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let snap = state.snapshot();
            view.render_into(&mut fb, &snap, score_store.best(), now_ms, Viewport::new(w, h));
            term.draw_swap(&mut fb)?;
        }

        // Poll until the next tick is due, capped for responsiveness.
        let timeout_ms = match next_tick_at {
            Some(due) if state.status() == GameStatus::Running => {
                due.saturating_sub(now_ms).min(MAX_POLL_MS)
            }
            _ => MAX_POLL_MS,
        };

        if event::poll(Duration::from_millis(timeout_ms))? {
            let mut command = None;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    command = map_key(key.code);
                }
                Event::Mouse(mouse) => {
                    command = swipes.handle_mouse(mouse).map(GameCommand::SetHeading);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }

            match command {
                Some(GameCommand::Quit) => return Ok(()),
                Some(cmd) => {
                    let now_ms = epoch.elapsed().as_millis() as u64;
                    apply_command(
                        cmd,
                        &mut state,
                        &mut settings_store,
                        &mut swipes,
                        &mut next_tick_at,
                        &mut score_recorded,
                        now_ms,
                    );
                }
                None => {}
            }
        }

        // Tick when due. One step per wakeup: a delayed resume re-arms the
        // deadline instead of replaying missed ticks.
        let now_ms = epoch.elapsed().as_millis() as u64;
        if state.status() == GameStatus::Running {
            let due = next_tick_at.get_or_insert(now_ms + state.effective_interval_ms());
            if now_ms >= *due {
                let result = state.tick(now_ms);
                next_tick_at = Some(now_ms + state.effective_interval_ms());

                let player: &mut dyn SoundPlayer = if state.sound_enabled() {
                    &mut bell
                } else {
                    &mut null
                };
                for event in &result.events {
                    match event {
                        TickEvent::FoodEaten { .. } => player.play(SoundEvent::Eat),
                        TickEvent::EffectStarted(_) => {}
                        TickEvent::GameOver { victory } => {
                            player.play(if *victory {
                                SoundEvent::Victory
                            } else {
                                SoundEvent::GameOver
                            });
                            if !score_recorded {
                                score_recorded = true;
                                // A failed write must not end the game; the
                                // in-memory table still updates.
                                let _ = score_store.record(state.score(), unix_millis());
                            }
                        }
                    }
                }
            }
        } else {
            next_tick_at = None;
        }
    }
}

fn apply_command(
    cmd: GameCommand,
    state: &mut GameState,
    settings_store: &mut SettingsStore,
    swipes: &mut SwipeTracker,
    next_tick_at: &mut Option<u64>,
    score_recorded: &mut bool,
    now_ms: u64,
) {
    match cmd {
        GameCommand::SetHeading(heading) => {
            state.set_heading(heading);
        }
        GameCommand::Start => {
            if state.start() {
                *next_tick_at = Some(now_ms + state.effective_interval_ms());
            }
        }
        GameCommand::TogglePause => {
            if state.toggle_pause() {
                // Re-arm on resume so the pause produces no catch-up ticks.
                *next_tick_at = match state.status() {
                    GameStatus::Running => Some(now_ms + state.effective_interval_ms()),
                    _ => None,
                };
            }
        }
        GameCommand::Reset => {
            state.reset();
            swipes.reset();
            *next_tick_at = None;
            *score_recorded = false;
        }
        GameCommand::SetDifficulty(difficulty) => {
            state.set_difficulty(difficulty);
            let mut settings = settings_store.settings();
            settings.difficulty = difficulty;
            // Settings changes apply in-session even if the write fails.
            let _ = settings_store.update(settings);
        }
        GameCommand::ToggleSound => {
            let enabled = !state.sound_enabled();
            state.set_sound_enabled(enabled);
            let mut settings = settings_store.settings();
            settings.sound_enabled = enabled;
            let _ = settings_store.update(settings);
        }
        GameCommand::Quit => {}
    }
}

/// Hash of everything visible. The head moves every tick, so gameplay frames
/// always differ; countdown tenths keep effect timers repainting.
fn frame_fingerprint(state: &GameState, now_ms: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    let head = state.snake().head();
    (head.x, head.y).hash(&mut hasher);
    state.snake().len().hash(&mut hasher);
    state.score().hash(&mut hasher);
    (state.status() as u8).hash(&mut hasher);
    state.difficulty().as_str().hash(&mut hasher);
    state.sound_enabled().hash(&mut hasher);
    if let Some(food) = state.food() {
        (food.pos.x, food.pos.y, food.kind.as_str()).hash(&mut hasher);
    }
    if !state.effects().is_empty() {
        (now_ms / 100).hash(&mut hasher);
    }
    hasher.finish()
}
