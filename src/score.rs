//! High-score persistence.
//!
//! Each game keeps its best score in `$HOME/.brick-arcade/<name>.score` as a
//! single ASCII integer. A missing or unreadable file reads back as zero so
//! a fresh install starts clean. Write failures are logged and otherwise
//! ignored; losing a high score must never take the game down.

use std::fs;
use std::path::PathBuf;

const SCORE_DIR: &str = ".brick-arcade";

pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Store for the named game under the user's home directory.
    pub fn for_game(name: &str) -> Self {
        let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
        Self {
            path: home.join(SCORE_DIR).join(format!("{name}.score")),
        }
    }

    /// Store backed by an explicit file path. Used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored score; missing or corrupt data yields 0.
    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Persist `score`, creating the directory on first use.
    pub fn save(&self, score: u32) {
        if let Some(dir) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(dir) {
                log::warn!("high score dir {}: {err}", dir.display());
                return;
            }
        }
        if let Err(err) = fs::write(&self.path, score.to_string()) {
            log::warn!("high score write {}: {err}", self.path.display());
        }
    }
}
