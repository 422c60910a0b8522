//! LocalStorage backend (WASM only)

use super::{HighScoreStore, PersistenceError};

/// High score kept under a LocalStorage key as a plain integer string
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "dino_high_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)
    }

    pub fn try_load(&self) -> Result<u32, PersistenceError> {
        let storage = Self::storage()?;
        let value = storage
            .get_item(&self.key)
            .map_err(|_| PersistenceError::Unavailable)?;
        Ok(value.and_then(|s| s.trim().parse().ok()).unwrap_or(0))
    }

    pub fn try_save(&self, high_score: u32) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(&self.key, &high_score.to_string())
            .map_err(|_| PersistenceError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                log::info!("High score loaded: {}", score);
                score
            }
            Err(e) => {
                log::warn!("High score load failed: {}", e);
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) {
        match self.try_save(high_score) {
            Ok(()) => log::info!("High score saved: {}", high_score),
            Err(e) => log::warn!("High score save failed: {}", e),
        }
    }
}
