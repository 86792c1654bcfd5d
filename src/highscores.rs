//! High score persistence
//!
//! A single best score, stored as `{"high_score": n}`. Loading never fails:
//! a missing or unreadable record counts as 0.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// On-disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Where the best score lives between sessions
pub trait HighScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn load_high_score(&self) -> u64;

    /// Persist a new best score
    fn save_high_score(&mut self, score: u64) -> GameResult<()>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> GameResult<HighScoreRecord> {
        let json = fs::read_to_string(&self.path).map_err(|e| GameError::io_at(&self.path, e))?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_high_score(&self) -> u64 {
        if !self.path.exists() {
            log::info!("No high score at {}, starting fresh", self.path.display());
            return 0;
        }
        match self.read_record() {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                record.high_score
            }
            Err(err) => {
                log::warn!("Ignoring unreadable high score: {}", err);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) -> GameResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| GameError::io_at(dir, e))?;
        }
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;

        // Write beside the target, then swap it in
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| GameError::io_at(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| GameError::io_at(&self.path, e))?;

        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub high_score: u64,
    /// Number of successful saves
    pub writes: usize,
}

impl MemoryHighScoreStore {
    pub fn with_score(high_score: u64) -> Self {
        Self {
            high_score,
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&self) -> u64 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u64) -> GameResult<()> {
        self.high_score = score;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tank-arena-{}-{}", std::process::id(), name))
            .join("highscore.json")
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = FileHighScoreStore::new(temp_path("missing"));
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = FileHighScoreStore::new(&path);
        store.save_high_score(1234).unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load_high_score(), 1234);

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"high_score":1234}"#);
        assert!(!path.with_extension("json.tmp").exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_zero() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ high_score: lots").unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load_high_score(), 0);

        fs::write(&path, r#"{"high_score":-5}"#).unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load_high_score(), 0);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryHighScoreStore::with_score(300);
        assert_eq!(store.load_high_score(), 300);
        store.save_high_score(500).unwrap();
        assert_eq!(store.load_high_score(), 500);
        assert_eq!(store.writes, 1);
    }
}
