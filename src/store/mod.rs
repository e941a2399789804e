//! Persistence module - high scores and settings as JSON files.
//!
//! The table logic is pure and file-free; `HighScoreStore` and
//! `SettingsStore` wrap it with load/save. Unreadable or corrupt files fall
//! back to defaults rather than failing the game.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, HIGH_SCORE_CAP};

/// One finished game worth remembering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Unix time in milliseconds when the game ended
    pub timestamp_ms: u64,
}

/// Top scores, best first, capped at [`HIGH_SCORE_CAP`] entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<ScoreEntry>,
}

impl HighScoreTable {
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Record a finished game. Zero scores are not worth keeping; returns
    /// whether the entry made the table.
    pub fn record(&mut self, score: u32, timestamp_ms: u64) -> bool {
        if score == 0 {
            return false;
        }

        self.entries.push(ScoreEntry {
            score,
            timestamp_ms,
        });
        // Best first; newer wins ties so a fresh equal score is visible.
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(b.timestamp_ms.cmp(&a.timestamp_ms)));
        self.entries.truncate(HIGH_SCORE_CAP);

        self.entries
            .iter()
            .any(|e| e.score == score && e.timestamp_ms == timestamp_ms)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// File-backed high score table
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    table: HighScoreTable,
}

impl HighScoreStore {
    /// Load from `path`; a missing or corrupt file yields an empty table.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = read_json(&path).unwrap_or_default();
        Self { path, table }
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    pub fn best(&self) -> u32 {
        self.table.best()
    }

    /// Record and persist. Returns whether the score made the table.
    pub fn record(&mut self, score: u32, timestamp_ms: u64) -> Result<bool> {
        let entered = self.table.record(score, timestamp_ms);
        if entered {
            write_json(&self.path, &self.table)?;
        }
        Ok(entered)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.table.clear();
        write_json(&self.path, &self.table)
    }
}

/// User-facing settings that survive restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            sound_enabled: true,
        }
    }
}

/// On-disk shape: difficulty as its lowercase name, so the file stays
/// readable and editable by hand.
#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    difficulty: String,
    sound_enabled: bool,
}

impl From<Settings> for SettingsFile {
    fn from(s: Settings) -> Self {
        Self {
            difficulty: s.difficulty.as_str().to_string(),
            sound_enabled: s.sound_enabled,
        }
    }
}

impl SettingsFile {
    fn into_settings(self) -> Settings {
        Settings {
            difficulty: Difficulty::from_str(&self.difficulty).unwrap_or_default(),
            sound_enabled: self.sound_enabled,
        }
    }
}

/// File-backed settings
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = read_json::<SettingsFile>(&path)
            .map(SettingsFile::into_settings)
            .unwrap_or_default();
        Self { path, settings }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn update(&mut self, settings: Settings) -> Result<()> {
        if self.settings == settings {
            return Ok(());
        }
        self.settings = settings;
        write_json(&self.path, &SettingsFile::from(settings))
    }
}

/// Default data directory (`$HOME/.tui-snake`), if a home is known
pub fn default_data_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| Path::new(&home).join(".tui-snake"))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Option<T> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating data dir {}", dir.display()))?;
    }
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}
