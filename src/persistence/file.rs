//! JSON file backend for native hosts

use std::fs;
use std::path::{Path, PathBuf};

use super::{HighScoreRecord, HighScoreStore, PersistenceError};

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<HighScoreRecord, PersistenceError> {
        if !self.path.exists() {
            return Ok(HighScoreRecord::default());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write via a temp file so a crash never leaves a half-written record
    pub fn try_save(&self, record: &HighScoreRecord) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(record)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> u32 {
        match self.try_load() {
            Ok(record) => {
                log::info!("High score loaded: {}", record.high_score);
                record.high_score
            }
            Err(e) => {
                log::warn!("Could not load high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) {
        match self.try_save(&HighScoreRecord { high_score }) {
            Ok(()) => log::info!("High score saved: {}", high_score),
            Err(e) => log::warn!("Could not save high score to {}: {}", self.path.display(), e),
        }
    }
}
