//! wasm-bindgen handle for browser hosts
//!
//! The host owns the `DinoGame` object; there is no global engine.

use std::sync::Once;

use wasm_bindgen::prelude::*;

use super::StateBuffer;
use crate::persistence::LocalStorageStore;
use crate::sim::Engine;
use crate::tuning::Tuning;

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }
    });
}

#[wasm_bindgen]
pub struct DinoGame {
    engine: Engine,
    buffer: StateBuffer,
}

#[wasm_bindgen]
impl DinoGame {
    /// Create an Idle game. High score is read from LocalStorage.
    /// `tuning_json` may override any gameplay constant.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>, tuning_json: Option<String>) -> Result<DinoGame, JsError> {
        init_logging();
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json)?,
            None => Tuning::default(),
        };
        let seed = seed.unwrap_or_else(|| js_sys::Date::now().to_bits() ^ rand::random::<u64>());
        let mut engine = Engine::new(tuning, Box::new(LocalStorageStore::default()), seed);
        engine.reset();
        let buffer = StateBuffer::with_obstacles(engine.tuning().max_obstacles);
        Ok(DinoGame { engine, buffer })
    }

    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    pub fn restart(&mut self) -> bool {
        self.engine.reset()
    }

    /// Advance one step; `time_ms` is the rAF / performance.now() timestamp
    pub fn update(&mut self, time_ms: f64) {
        self.engine.update(time_ms);
    }

    pub fn jump(&mut self) -> bool {
        self.engine.jump()
    }

    /// Flat snapshot; read index 10 for the obstacle count
    pub fn state_array(&mut self) -> js_sys::Float32Array {
        let snapshot = self.engine.snapshot();
        js_sys::Float32Array::from(self.buffer.fill(&snapshot))
    }

    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(self.engine.snapshot().to_json()?)
    }

    pub fn game_state(&self) -> u8 {
        self.engine.phase().code()
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn high_score(&self) -> u32 {
        self.engine.high_score()
    }
}
