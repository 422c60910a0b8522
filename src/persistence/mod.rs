//! High score persistence
//!
//! The engine only needs two fire-and-forget calls: load once at startup,
//! save whenever a run ends. Backends swallow and log their own failures.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Errors raised inside persistence backends
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt high score record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable")]
    Unavailable,
}

/// Stored record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// Save/load capability injected into the engine
pub trait HighScoreStore {
    fn load(&mut self) -> u32;
    fn save(&mut self, high_score: u32);
}

/// No persistence at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl HighScoreStore for NullStore {
    fn load(&mut self) -> u32 {
        0
    }

    fn save(&mut self, _high_score: u32) {}
}

/// In-memory store; clones share the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<u32>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.value.get()
    }

    fn save(&mut self, high_score: u32) {
        self.value.set(high_score);
        self.saves.set(self.saves.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new(42);
        let mut handle = store.clone();
        assert_eq!(handle.load(), 42);
        handle.save(99);
        assert_eq!(store.value(), 99);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_null_store() {
        let mut store = NullStore;
        store.save(10);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_string(&HighScoreRecord { high_score: 7 }).unwrap();
        assert_eq!(json, r#"{"high_score":7}"#);
    }
}
