use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod reducer;
pub mod rules;
pub mod types;
pub mod wasm;

pub use error::{EngineError, EngineResult};
pub use game::{GameConfig, GameInstance};
pub use reducer::{GameAction, game_reducer};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
}
