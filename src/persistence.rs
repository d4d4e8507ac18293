//! High-score persistence
//!
//! The high score lives in a small JSON file with a single field, so
//! it stays human-inspectable and editable. A missing or unreadable
//! file is treated as a high score of 0; a failed save is reported to
//! the caller, who logs it and carries on. Neither direction is ever
//! fatal to the game loop.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGHSCORE_FILE: &str = "snake_highscore.json";

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// File-backed store for the single persisted value
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored high score, falling back to 0
    ///
    /// An absent file is the normal first-run case. A file that exists
    /// but cannot be parsed is logged and also treated as 0.
    pub fn load(&self) -> u32 {
        if !self.path.exists() {
            return 0;
        }

        match self.try_load() {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable high score file, starting from 0"
                );
                0
            }
        }
    }

    fn try_load(&self) -> Result<u32> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(record.high_score)
    }

    /// Persist a new high score, creating parent directories if needed
    pub fn save(&self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string(&HighScoreRecord { high_score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("snake_highscore.json"));

        store.save(42).unwrap();
        assert_eq!(store.load(), 42);
    }

    #[test]
    fn test_missing_file_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("does_not_exist.json"));

        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_malformed_file_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake_highscore.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = HighScoreStore::new(path);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("nested/dir/highscore.json"));

        store.save(7).unwrap();
        assert_eq!(store.load(), 7);
    }

    #[test]
    fn test_file_format_is_a_single_key_value_pair() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake_highscore.json");
        let store = HighScoreStore::new(&path);

        store.save(12).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, r#"{"high_score":12}"#);
    }
}
